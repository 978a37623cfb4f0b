//! Test utilities for ACME Bot
//!
//! Temporary directory management, test file creation, and assertion
//! helpers shared by the unit tests.

use crate::config::Config;
use crate::error::AcmeBotError;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a temporary directory for testing
///
/// The directory is removed when the returned `TempDir` is dropped.
pub fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Create a test file with the given content and return its path
///
/// # Panics
///
/// Panics if file creation or writing fails
pub fn create_test_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write test file");
    path
}

/// Assert that an `anyhow` result failed with the given `AcmeBotError`
/// kind and a message containing `expected`
///
/// # Panics
///
/// Panics if the result is Ok, is not an `AcmeBotError`, fails `kind`, or
/// the message does not contain `expected`
pub fn assert_error_contains<T: std::fmt::Debug>(
    result: anyhow::Result<T>,
    kind: fn(&AcmeBotError) -> bool,
    expected: &str,
) {
    let err = match result {
        Ok(value) => panic!("Expected error containing '{}' but got Ok({:?})", expected, value),
        Err(e) => e,
    };
    let acme = err
        .downcast_ref::<AcmeBotError>()
        .unwrap_or_else(|| panic!("Expected AcmeBotError but got: {:#}", err));
    assert!(kind(acme), "Unexpected error kind: {:?}", acme);

    let error_msg = acme.to_string();
    assert!(
        error_msg.contains(expected),
        "Error message '{}' does not contain '{}'",
        error_msg,
        expected
    );
}

/// Configuration pointing the provider at `api_base` (usually a mock server)
pub fn test_config(api_base: &str) -> Config {
    let mut config = Config::default();
    config.provider.api_base = api_base.to_string();
    config.provider.api_key = Some("test-key".to_string());
    config
}

/// A complete configuration file as YAML
pub fn test_config_yaml() -> String {
    r#"
provider:
  api_base: http://localhost:8089/v1
  api_key: sk-test
  model: moonshot-v1-8k
  file_model: moonshot-v1-32k
  temperature: 0.3
  timeout_seconds: 30

server:
  host: 0.0.0.0
  port: 8080

relay:
  max_upload_bytes: 1048576
  default_question: What is in this file?
  delete_uploaded_files: true

client:
  relay_url: http://localhost:8080
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_dir_creation() {
        let dir = temp_dir();
        assert!(dir.path().exists());
    }

    #[test]
    fn test_create_test_file() {
        let dir = temp_dir();
        let path = create_test_file(&dir, "test.txt", "content");
        assert!(path.exists());
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "content");
    }

    #[test]
    fn test_assert_error_contains_success() {
        let result: anyhow::Result<()> =
            Err(AcmeBotError::Config("test error message".to_string()).into());
        assert_error_contains(
            result,
            |e| matches!(e, AcmeBotError::Config(_)),
            "test error",
        );
    }

    #[test]
    #[should_panic(expected = "Expected error containing")]
    fn test_assert_error_contains_ok() {
        let result: anyhow::Result<()> = Ok(());
        assert_error_contains(result, |_| true, "error");
    }

    #[test]
    #[should_panic(expected = "Unexpected error kind")]
    fn test_assert_error_contains_wrong_kind() {
        let result: anyhow::Result<()> =
            Err(AcmeBotError::Relay("different error".to_string()).into());
        assert_error_contains(result, |e| matches!(e, AcmeBotError::Config(_)), "error");
    }

    #[test]
    fn test_test_config() {
        let config = test_config("http://127.0.0.1:1/v1");
        assert_eq!(config.provider.api_key.as_deref(), Some("test-key"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_test_config_yaml() {
        let config: Config = serde_yaml::from_str(&test_config_yaml()).unwrap();
        assert_eq!(config.provider.file_model, "moonshot-v1-32k");
        assert!(config.relay.delete_uploaded_files);
        assert!(config.validate().is_ok());
    }
}
