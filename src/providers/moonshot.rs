//! Moonshot (Kimi) provider implementation for ACME Bot
//!
//! This module implements the Provider trait against Moonshot's
//! OpenAI-compatible API: `POST /chat/completions` for completions and
//! `POST /files` / `DELETE /files/{id}` for file storage.

use crate::config::ProviderConfig;
use crate::error::{AcmeBotError, Result};
use crate::providers::{FileUpload, Message, Provider};

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Purpose tag sent with every upload so the provider extracts file text
pub const FILE_PURPOSE: &str = "file-extract";

/// Moonshot API provider
///
/// # Examples
///
/// ```no_run
/// use acme_bot::config::ProviderConfig;
/// use acme_bot::providers::{Message, MoonshotProvider, Provider};
///
/// # async fn example() -> acme_bot::error::Result<()> {
/// let config = ProviderConfig {
///     api_key: Some("sk-...".to_string()),
///     ..Default::default()
/// };
/// let provider = MoonshotProvider::new(config)?;
/// let reply = provider.complete(&[Message::user("Hello!")], None).await?;
/// # Ok(())
/// # }
/// ```
pub struct MoonshotProvider {
    client: Client,
    config: ProviderConfig,
}

/// Request body for `/chat/completions`
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    temperature: f32,
}

/// Response body from `/chat/completions`
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<CompletionChoice>,
    #[serde(default)]
    usage: Option<CompletionUsage>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct CompletionUsage {
    #[serde(default)]
    prompt_tokens: usize,
    #[serde(default)]
    completion_tokens: usize,
}

/// Response body from `/files`
#[derive(Debug, Deserialize)]
struct FileObject {
    id: String,
    #[serde(default)]
    bytes: Option<u64>,
}

impl MoonshotProvider {
    /// Create a new Moonshot provider instance
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails
    ///
    /// # Examples
    ///
    /// ```
    /// use acme_bot::config::ProviderConfig;
    /// use acme_bot::providers::MoonshotProvider;
    ///
    /// let provider = MoonshotProvider::new(ProviderConfig::default());
    /// assert!(provider.is_ok());
    /// ```
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let mut builder =
            Client::builder().user_agent(concat!("acme-bot/", env!("CARGO_PKG_VERSION")));
        if let Some(secs) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| AcmeBotError::Provider(format!("Failed to create HTTP client: {}", e)))?;

        tracing::info!(
            "Initialized Moonshot provider: api_base={}, model={}, file_model={}",
            config.api_base,
            config.model,
            config.file_model
        );

        Ok(Self { client, config })
    }

    /// Get the configured default model name
    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.api_base.trim_end_matches('/'), path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }

    /// Sends a request and returns the body of a success response
    async fn send(&self, request: RequestBuilder, what: &str) -> Result<String> {
        let response = self.authorize(request).send().await.map_err(|e| {
            tracing::warn!("Moonshot {} request failed: {}", what, e);
            AcmeBotError::Provider(format!("Failed to reach provider: {}", e))
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            AcmeBotError::Provider(format!("Failed to read {} response: {}", what, e))
        })?;

        if !status.is_success() {
            tracing::error!("Moonshot {} returned error {}: {}", what, status, body);
            return Err(AcmeBotError::ProviderStatus {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        Ok(body)
    }
}

/// Extract the first choice's content from a completion response body
fn parse_completion(body: &str) -> Result<String> {
    let response: ChatCompletionResponse = serde_json::from_str(body).map_err(|e| {
        AcmeBotError::MalformedProviderResponse(format!("completion body: {}", e))
    })?;

    if let Some(usage) = &response.usage {
        tracing::debug!(
            prompt_tokens = usage.prompt_tokens,
            completion_tokens = usage.completion_tokens,
            "Moonshot completion usage"
        );
    }

    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or_else(|| {
            AcmeBotError::MalformedProviderResponse("completion has no choices".to_string()).into()
        })
}

/// Extract the file identifier from an upload response body
fn parse_file_id(body: &str) -> Result<String> {
    let file: FileObject = serde_json::from_str(body)
        .map_err(|e| AcmeBotError::MalformedProviderResponse(format!("upload body: {}", e)))?;

    if file.id.is_empty() {
        return Err(
            AcmeBotError::MalformedProviderResponse("upload returned an empty id".to_string())
                .into(),
        );
    }

    tracing::debug!(file_id = %file.id, bytes = ?file.bytes, "Moonshot stored file");
    Ok(file.id)
}

#[async_trait]
impl Provider for MoonshotProvider {
    async fn complete(&self, messages: &[Message], model: Option<&str>) -> Result<String> {
        let request = ChatCompletionRequest {
            model: model.unwrap_or(self.config.model.as_str()),
            messages,
            temperature: self.config.temperature,
        };

        tracing::debug!(
            "Sending Moonshot completion: model={}, {} messages",
            request.model,
            messages.len()
        );

        let body = self
            .send(
                self.client
                    .post(self.endpoint("chat/completions"))
                    .json(&request),
                "completion",
            )
            .await?;

        parse_completion(&body)
    }

    async fn upload_file(&self, file: FileUpload) -> Result<String> {
        tracing::debug!(
            "Uploading file to Moonshot: name={}, type={}, {} bytes",
            file.file_name,
            file.content_type,
            file.len()
        );

        let part = reqwest::multipart::Part::bytes(file.data.to_vec())
            .file_name(file.file_name.clone())
            .mime_str(&file.content_type)
            .or_else(|_| {
                reqwest::multipart::Part::bytes(file.data.to_vec())
                    .file_name(file.file_name.clone())
                    .mime_str("application/octet-stream")
            })?;
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("purpose", FILE_PURPOSE);

        let body = self
            .send(
                self.client.post(self.endpoint("files")).multipart(form),
                "upload",
            )
            .await?;

        parse_file_id(&body)
    }

    async fn delete_file(&self, file_id: &str) -> Result<()> {
        self.send(
            self.client.delete(self.endpoint(&format!("files/{}", file_id))),
            "file delete",
        )
        .await?;
        tracing::debug!(file_id = %file_id, "Deleted Moonshot file");
        Ok(())
    }
}
