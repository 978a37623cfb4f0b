//! Base provider trait and common types for ACME Bot
//!
//! This module defines the Provider trait the relay endpoints talk to,
//! along with the role-tagged message type sent to the completion endpoint
//! and the file payload handed to the file-storage endpoint.

use crate::error::Result;
use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Message structure for a completion request
///
/// Represents one `{role, content}` pair sent to the provider. Built per
/// call and never retained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message sender (system, user, assistant)
    pub role: String,
    /// Content of the message
    pub content: String,
}

impl Message {
    /// Creates a new user message
    ///
    /// # Examples
    ///
    /// ```
    /// use acme_bot::providers::Message;
    ///
    /// let msg = Message::user("Hello, assistant!");
    /// assert_eq!(msg.role, "user");
    /// ```
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    /// Creates a new assistant message
    ///
    /// # Examples
    ///
    /// ```
    /// use acme_bot::providers::Message;
    ///
    /// let msg = Message::assistant("Hello, user!");
    /// assert_eq!(msg.role, "assistant");
    /// ```
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }

    /// Creates a new system message
    ///
    /// # Examples
    ///
    /// ```
    /// use acme_bot::providers::Message;
    ///
    /// let msg = Message::system("You are a helpful assistant");
    /// assert_eq!(msg.role, "system");
    /// ```
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }
}

/// A file on its way to the provider's file-storage endpoint
#[derive(Debug, Clone)]
pub struct FileUpload {
    /// Original file name as sent by the client
    pub file_name: String,
    /// MIME type; `application/octet-stream` when unknown
    pub content_type: String,
    /// File contents
    pub data: Bytes,
}

impl FileUpload {
    /// Creates a new upload payload
    ///
    /// # Examples
    ///
    /// ```
    /// use acme_bot::providers::FileUpload;
    ///
    /// let upload = FileUpload::new("report.pdf", "application/pdf", vec![1u8, 2, 3]);
    /// assert_eq!(upload.len(), 3);
    /// ```
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            data: data.into(),
        }
    }

    /// Size of the payload in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the payload is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Provider trait for the LLM service behind the relay
///
/// Each method is a single round trip: no retries, no streaming. Errors
/// carry full diagnostic detail; callers decide what to expose.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Runs one chat completion and returns the first choice's text
    ///
    /// # Arguments
    ///
    /// * `messages` - Ordered role-tagged messages
    /// * `model` - Model override; the provider's default model when `None`
    ///
    /// # Errors
    ///
    /// Returns `AcmeBotError::ProviderStatus` on a non-success status,
    /// `AcmeBotError::MalformedProviderResponse` when the body does not have
    /// the expected shape, and `AcmeBotError::Provider` on transport failure.
    async fn complete(&self, messages: &[Message], model: Option<&str>) -> Result<String>;

    /// Stores a file with the provider and returns its identifier
    ///
    /// # Errors
    ///
    /// Same error kinds as [`Provider::complete`].
    async fn upload_file(&self, file: FileUpload) -> Result<String>;

    /// Deletes a previously uploaded file
    ///
    /// # Default Implementation
    ///
    /// The default implementation returns an error indicating that file
    /// deletion is not supported by this provider.
    async fn delete_file(&self, file_id: &str) -> Result<()> {
        Err(crate::error::AcmeBotError::Provider(format!(
            "Deleting files is not supported by this provider (file {})",
            file_id
        ))
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_serializes_as_role_content_pair() {
        let json = serde_json::to_value(Message::user("Hello")).unwrap();
        assert_eq!(json, serde_json::json!({"role": "user", "content": "Hello"}));
    }

    #[test]
    fn test_file_upload_len() {
        let upload = FileUpload::new("a.txt", "text/plain", Bytes::from_static(b""));
        assert!(upload.is_empty());
        assert_eq!(upload.len(), 0);
    }

    struct UploadOnly;

    #[async_trait]
    impl Provider for UploadOnly {
        async fn complete(&self, _messages: &[Message], _model: Option<&str>) -> Result<String> {
            Ok(String::new())
        }

        async fn upload_file(&self, _file: FileUpload) -> Result<String> {
            Ok("file-1".to_string())
        }
    }

    #[tokio::test]
    async fn test_delete_file_default_is_unsupported() {
        let err = UploadOnly.delete_file("file-1").await.unwrap_err();
        assert!(err.to_string().contains("not supported"));
    }
}
