//! Client side of the relay endpoints
//!
//! The chat session talks to the relay through [`RelayClient`]. The HTTP
//! implementation reads the `reply` field whatever the status code, since
//! the relay puts its fixed failure text there too.

use super::StagedFile;
use crate::error::{AcmeBotError, Result};
use crate::relay::{CHAT_PATH, FILES_PATH};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

/// Transport used by the chat session to reach the relay endpoints
#[async_trait]
pub trait RelayClient: Send + Sync {
    /// Send a text message; returns the reply text (empty if absent)
    async fn send_text(&self, message: &str) -> Result<String>;

    /// Send a staged file and a question; returns the reply text (empty if absent)
    async fn send_file(&self, file: &StagedFile, question: &str) -> Result<String>;
}

#[derive(Debug, Deserialize)]
struct ReplyBody {
    #[serde(default)]
    reply: Option<String>,
}

/// HTTP client for a running relay server
#[derive(Debug, Clone)]
pub struct HttpRelayClient {
    client: Client,
    base_url: String,
}

impl HttpRelayClient {
    /// Create a client for the relay at `base_url`
    ///
    /// # Errors
    ///
    /// Returns error if the URL is invalid or the HTTP client cannot be built
    ///
    /// # Examples
    ///
    /// ```
    /// use acme_bot::session::HttpRelayClient;
    ///
    /// let client = HttpRelayClient::new("http://127.0.0.1:3000").unwrap();
    /// assert_eq!(client.base_url(), "http://127.0.0.1:3000");
    /// ```
    pub fn new(base_url: &str) -> Result<Self> {
        url::Url::parse(base_url)
            .map_err(|e| AcmeBotError::Relay(format!("Invalid relay URL {}: {}", base_url, e)))?;

        let client = Client::builder()
            .user_agent(concat!("acme-bot/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AcmeBotError::Relay(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL of the relay
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn read_reply(response: reqwest::Response) -> Result<String> {
        let status = response.status();
        let body: ReplyBody = response.json().await.map_err(|e| {
            AcmeBotError::Relay(format!("Unreadable relay response ({}): {}", status, e))
        })?;
        if !status.is_success() {
            tracing::debug!("Relay answered {} with {:?}", status, body.reply);
        }
        Ok(body.reply.unwrap_or_default())
    }
}

#[async_trait]
impl RelayClient for HttpRelayClient {
    async fn send_text(&self, message: &str) -> Result<String> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, CHAT_PATH))
            .json(&serde_json::json!({ "message": message }))
            .send()
            .await?;
        Self::read_reply(response).await
    }

    async fn send_file(&self, file: &StagedFile, question: &str) -> Result<String> {
        let part = reqwest::multipart::Part::bytes(file.data.to_vec())
            .file_name(file.name.clone())
            .mime_str(&file.content_type)?;
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("question", question.to_string());

        let response = self
            .client
            .post(format!("{}{}", self.base_url, FILES_PATH))
            .multipart(form)
            .send()
            .await?;
        Self::read_reply(response).await
    }
}
