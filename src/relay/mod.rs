//! Relay endpoints
//!
//! Two stateless axum handlers forward client requests to the provider:
//!
//! - `POST /api/chat` (text relay): `{ "message": "..." }` → `{ "reply": "..." }`
//! - `POST /api/files` (file relay): multipart `file` + optional `question`
//!   → upload to the provider, then a completion referencing the file.
//!
//! Handlers share an immutable [`RelayState`]; nothing crosses request
//! boundaries.

pub mod chat;
pub mod error;
pub mod files;

pub use error::{RelayError, RelayReply};

use crate::config::Config;
use crate::providers::Provider;
use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Path of the text relay endpoint
pub const CHAT_PATH: &str = "/api/chat";

/// Path of the file relay endpoint
pub const FILES_PATH: &str = "/api/files";

/// Per-deployment relay behavior
#[derive(Debug, Clone)]
pub struct RelaySettings {
    /// Model used for questions about uploaded files
    pub file_model: String,
    /// Question used when a file arrives without one
    pub default_question: String,
    /// Delete the provider-side file after the completion call
    pub delete_uploaded_files: bool,
    /// Maximum accepted request body in bytes
    pub max_body_bytes: usize,
}

impl RelaySettings {
    /// Build settings from the loaded configuration
    pub fn from_config(config: &Config) -> Self {
        Self {
            file_model: config.provider.file_model.clone(),
            default_question: config.relay.default_question.clone(),
            delete_uploaded_files: config.relay.delete_uploaded_files,
            max_body_bytes: config.relay.max_upload_bytes,
        }
    }
}

impl Default for RelaySettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Shared state handed to every relay handler
#[derive(Clone)]
pub struct RelayState {
    provider: Arc<dyn Provider>,
    settings: Arc<RelaySettings>,
}

impl RelayState {
    /// Create relay state around a provider
    pub fn new(provider: Arc<dyn Provider>, settings: RelaySettings) -> Self {
        Self {
            provider,
            settings: Arc::new(settings),
        }
    }

    /// The provider requests are forwarded to
    pub fn provider(&self) -> &dyn Provider {
        self.provider.as_ref()
    }

    /// Relay behavior settings
    pub fn settings(&self) -> &RelaySettings {
        &self.settings
    }
}

/// Build the relay router
///
/// # Examples
///
/// ```
/// use acme_bot::config::ProviderConfig;
/// use acme_bot::providers::create_provider;
/// use acme_bot::relay::{router, RelaySettings, RelayState};
///
/// let provider = create_provider(&ProviderConfig::default()).unwrap();
/// let app = router(RelayState::new(provider, RelaySettings::default()));
/// ```
pub fn router(state: RelayState) -> Router {
    let max_body_bytes = state.settings.max_body_bytes;

    Router::new()
        .route(CHAT_PATH, post(chat::relay_text))
        .route(FILES_PATH, post(files::relay_file))
        .with_state(state)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_from_config() {
        let mut config = Config::default();
        config.provider.file_model = "moonshot-v1-32k".to_string();
        config.relay.delete_uploaded_files = true;
        config.relay.max_upload_bytes = 1024;

        let settings = RelaySettings::from_config(&config);
        assert_eq!(settings.file_model, "moonshot-v1-32k");
        assert!(settings.delete_uploaded_files);
        assert_eq!(settings.max_body_bytes, 1024);
        assert_eq!(settings.default_question, "Summarise this document.");
    }
}
