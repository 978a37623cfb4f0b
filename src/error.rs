//! Error types for ACME Bot
//!
//! This module defines the error types used by the provider client, the
//! chat session and configuration loading, using `thiserror` for ergonomic
//! error handling. Relay endpoints translate these into fixed HTTP responses
//! in [`crate::relay::RelayError`].

use thiserror::Error;

/// Main error type for ACME Bot operations
#[derive(Error, Debug)]
pub enum AcmeBotError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Provider-related errors (client setup, transport failures)
    #[error("Provider error: {0}")]
    Provider(String),

    /// Provider answered with a non-success status
    ///
    /// The raw response body is kept for diagnostics and must never be
    /// forwarded to relay callers.
    #[error("Provider returned status {status}: {body}")]
    ProviderStatus {
        /// HTTP status code returned by the provider
        status: u16,
        /// Raw response body
        body: String,
    },

    /// Provider answered with a success status but an unexpected body shape
    #[error("Malformed provider response: {0}")]
    MalformedProviderResponse(String),

    /// Staging a file for the chat session failed
    #[error("Attachment error: {0}")]
    Attachment(String),

    /// Talking to the relay server failed
    #[error("Relay error: {0}")]
    Relay(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for ACME Bot operations
///
/// Uses `anyhow::Error` so callers can attach context while still being
/// able to downcast to [`AcmeBotError`] where the kind matters.
pub type Result<T> = anyhow::Result<T>;
