//! Configuration management for ACME Bot
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.
//! The provider API key is resolved once here and then passed explicitly
//! to the provider; nothing else reads it from the environment.

use crate::cli::{Cli, Commands};
use crate::error::{AcmeBotError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable holding the provider API key
pub const API_KEY_ENV: &str = "MOONSHOT_API_KEY";

/// Main configuration structure for ACME Bot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Provider (Kimi / Moonshot) settings
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Relay server listen address
    #[serde(default)]
    pub server: ServerConfig,

    /// Relay endpoint behavior
    #[serde(default)]
    pub relay: RelayConfig,

    /// Terminal chat client settings
    #[serde(default)]
    pub client: ClientConfig,
}

/// Provider configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Base URL of the OpenAI-compatible API (useful for tests and local mocks)
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// API key sent as a bearer token
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model used for plain text chat
    #[serde(default = "default_model")]
    pub model: String,

    /// Model used when answering questions about an uploaded file
    #[serde(default = "default_model")]
    pub file_model: String,

    /// Sampling temperature for every completion
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Optional request timeout; unset means wait indefinitely
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

fn default_api_base() -> String {
    "https://api.moonshot.cn/v1".to_string()
}

fn default_model() -> String {
    "kimi-latest".to_string()
}

fn default_temperature() -> f32 {
    0.1
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            api_key: None,
            model: default_model(),
            file_model: default_model(),
            temperature: default_temperature(),
            timeout_seconds: None,
        }
    }
}

// Hand-written so the key never ends up in logs.
impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_base", &self.api_base)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("file_model", &self.file_model)
            .field("temperature", &self.temperature)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

/// Relay server listen address
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Relay endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Maximum accepted request body (bytes)
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,

    /// Question used when a file arrives without one
    #[serde(default = "default_question")]
    pub default_question: String,

    /// Delete the provider-side file once the file relay is done with it
    #[serde(default)]
    pub delete_uploaded_files: bool,
}

fn default_max_upload_bytes() -> usize {
    100 * 1024 * 1024 // 100 MB
}

/// Question asked about a file when the user typed nothing
pub fn default_question() -> String {
    "Summarise this document.".to_string()
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: default_max_upload_bytes(),
            default_question: default_question(),
            delete_uploaded_files: false,
        }
    }
}

/// Terminal chat client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the relay server
    #[serde(default = "default_relay_url")]
    pub relay_url: String,
}

fn default_relay_url() -> String {
    "http://127.0.0.1:3000".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            relay_url: default_relay_url(),
        }
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| AcmeBotError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| AcmeBotError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                self.provider.api_key = Some(key);
            }
        }

        if let Ok(api_base) = std::env::var("ACME_BOT_API_BASE") {
            self.provider.api_base = api_base;
        }

        if let Ok(model) = std::env::var("ACME_BOT_MODEL") {
            self.provider.model = model;
        }

        if let Ok(file_model) = std::env::var("ACME_BOT_FILE_MODEL") {
            self.provider.file_model = file_model;
        }

        if let Ok(host) = std::env::var("ACME_BOT_HOST") {
            self.server.host = host;
        }

        if let Ok(port) = std::env::var("ACME_BOT_PORT") {
            match port.parse() {
                Ok(value) => self.server.port = value,
                Err(_) => tracing::warn!("Invalid ACME_BOT_PORT: {}", port),
            }
        }

        if let Ok(relay_url) = std::env::var("ACME_BOT_RELAY_URL") {
            tracing::debug!(relay_url = %relay_url, "Env override: ACME_BOT_RELAY_URL");
            self.client.relay_url = relay_url;
        }
    }

    fn apply_cli_overrides(&mut self, cli: &Cli) {
        if cli.verbose {
            tracing::debug!("Verbose mode enabled");
        }

        match &cli.command {
            Commands::Serve { host, port } => {
                if let Some(host) = host {
                    self.server.host = host.clone();
                }
                if let Some(port) = port {
                    self.server.port = *port;
                }
            }
            Commands::Chat { relay_url } => {
                if let Some(relay_url) = relay_url {
                    self.client.relay_url = relay_url.clone();
                }
            }
        }
    }

    /// Validate the configuration
    ///
    /// A missing API key is not an error: every provider call will then be
    /// rejected by the provider, which the relay reports as a server error.
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        if self.provider.api_base.trim().is_empty() {
            return Err(AcmeBotError::Config("provider.api_base cannot be empty".to_string()).into());
        }

        url::Url::parse(&self.provider.api_base).map_err(|e| {
            AcmeBotError::Config(format!(
                "provider.api_base is not a valid URL ({}): {}",
                self.provider.api_base, e
            ))
        })?;

        if self.provider.model.trim().is_empty() || self.provider.file_model.trim().is_empty() {
            return Err(AcmeBotError::Config("provider models cannot be empty".to_string()).into());
        }

        if !(0.0..=2.0).contains(&self.provider.temperature) {
            return Err(AcmeBotError::Config(
                "provider.temperature must be between 0.0 and 2.0".to_string(),
            )
            .into());
        }

        if self.provider.timeout_seconds == Some(0) {
            return Err(AcmeBotError::Config(
                "provider.timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        if self.server.port == 0 {
            return Err(AcmeBotError::Config("server.port must be greater than 0".to_string()).into());
        }

        if self.relay.max_upload_bytes == 0 {
            return Err(AcmeBotError::Config(
                "relay.max_upload_bytes must be greater than 0".to_string(),
            )
            .into());
        }

        url::Url::parse(&self.client.relay_url).map_err(|e| {
            AcmeBotError::Config(format!(
                "client.relay_url is not a valid URL ({}): {}",
                self.client.relay_url, e
            ))
        })?;

        if self.provider.api_key.is_none() {
            tracing::warn!(
                "No provider API key configured (set {} or provider.api_key); provider calls will fail",
                API_KEY_ENV
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_error_contains, create_test_file, temp_dir, test_config_yaml};
    use serial_test::serial;

    fn chat_cli(relay_url: Option<&str>) -> Cli {
        Cli {
            config: None,
            verbose: false,
            command: Commands::Chat {
                relay_url: relay_url.map(str::to_string),
            },
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.provider.api_base, "https://api.moonshot.cn/v1");
        assert_eq!(config.provider.model, "kimi-latest");
        assert!((config.provider.temperature - 0.1).abs() < f32::EPSILON);
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.relay.default_question, "Summarise this document.");
        assert!(!config.relay.delete_uploaded_files);
    }

    #[test]
    fn test_config_validation_success() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_config_validation_bad_temperature() {
        let mut config = Config::default();
        config.provider.temperature = 3.5;
        assert_error_contains(
            config.validate(),
            |e| matches!(e, AcmeBotError::Config(_)),
            "temperature",
        );
    }

    #[test]
    fn test_config_validation_empty_model() {
        let mut config = Config::default();
        config.provider.file_model = "  ".to_string();
        assert_error_contains(
            config.validate(),
            |e| matches!(e, AcmeBotError::Config(_)),
            "models cannot be empty",
        );
    }

    #[test]
    fn test_config_validation_bad_relay_url() {
        let mut config = Config::default();
        config.client.relay_url = "localhost:3000/chat".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn test_load_from_file() {
        let dir = temp_dir();
        let path = create_test_file(&dir, "config.yaml", &test_config_yaml());
        let config = Config::load(&path.to_string_lossy(), &chat_cli(None)).unwrap();

        assert_eq!(config.provider.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.provider.timeout_seconds, Some(30));
        assert_eq!(config.relay.max_upload_bytes, 1048576);
        assert_eq!(config.relay.default_question, "What is in this file?");
        assert_eq!(config.client.relay_url, "http://localhost:8080");
    }

    #[test]
    #[serial]
    fn test_load_malformed_file() {
        let dir = temp_dir();
        let path = create_test_file(&dir, "config.yaml", "provider: [not, a, map]");
        assert_error_contains(
            Config::load(&path.to_string_lossy(), &chat_cli(None)),
            |e| matches!(e, AcmeBotError::Config(_)),
            "Failed to parse config",
        );
    }

    #[test]
    fn test_config_validation_bad_api_base() {
        let mut config = Config::default();
        config.provider.api_base = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_zero_port() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_zero_timeout() {
        let mut config = Config::default();
        config.provider.timeout_seconds = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_yaml() {
        let yaml = r#"
provider:
  api_base: http://localhost:9999/v1
  model: moonshot-v1-8k
relay:
  delete_uploaded_files: true
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.provider.api_base, "http://localhost:9999/v1");
        assert_eq!(config.provider.model, "moonshot-v1-8k");
        assert_eq!(config.provider.file_model, "kimi-latest");
        assert!(config.relay.delete_uploaded_files);
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let mut config = Config::default();
        config.provider.api_key = Some("sk-secret".to_string());
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        std::env::set_var(API_KEY_ENV, "sk-from-env");
        std::env::set_var("ACME_BOT_PORT", "8088");
        let config = Config::load("does/not/exist.yaml", &chat_cli(None)).unwrap();
        std::env::remove_var(API_KEY_ENV);
        std::env::remove_var("ACME_BOT_PORT");

        assert_eq!(config.provider.api_key.as_deref(), Some("sk-from-env"));
        assert_eq!(config.server.port, 8088);
    }

    #[test]
    #[serial]
    fn test_invalid_port_env_is_ignored() {
        std::env::set_var("ACME_BOT_PORT", "not-a-port");
        let config = Config::load("does/not/exist.yaml", &chat_cli(None)).unwrap();
        std::env::remove_var("ACME_BOT_PORT");
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    #[serial]
    fn test_cli_overrides_win_over_env() {
        std::env::set_var("ACME_BOT_RELAY_URL", "http://env:1");
        let config =
            Config::load("does/not/exist.yaml", &chat_cli(Some("http://cli:2"))).unwrap();
        std::env::remove_var("ACME_BOT_RELAY_URL");
        assert_eq!(config.client.relay_url, "http://cli:2");
    }

    #[test]
    #[serial]
    fn test_serve_overrides() {
        let cli = Cli {
            config: None,
            verbose: false,
            command: Commands::Serve {
                host: Some("0.0.0.0".to_string()),
                port: Some(4000),
            },
        };
        let config = Config::load("does/not/exist.yaml", &cli).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 4000);
    }
}
