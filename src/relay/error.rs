//! Relay boundary errors.
//!
//! Every relay handler returns `Result<Json<RelayReply>, RelayError>`.
//! `RelayError` implements [`axum::response::IntoResponse`] and always
//! answers with a fixed `{"reply": ...}` body. Provider detail is logged
//! where the error is created and never reaches the caller.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Response body shared by both relay endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayReply {
    /// Model answer on success, fixed failure text otherwise
    pub reply: String,
}

impl RelayReply {
    /// Wrap reply text
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
        }
    }
}

/// All failures a relay endpoint reports to its caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RelayError {
    /// Text relay body missing a usable `message`
    #[error("Invalid input")]
    InvalidInput,

    /// File relay request without a `file` part
    #[error("No file uploaded")]
    NoFile,

    /// Provider file upload failed
    #[error("Upload failed")]
    UploadFailed,

    /// Completion about an uploaded file failed
    #[error("File chat failed")]
    CompletionFailed,

    /// Text completion failed
    #[error("Server error")]
    ServerError,
}

impl RelayError {
    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::InvalidInput | RelayError::NoFile => StatusCode::BAD_REQUEST,
            RelayError::UploadFailed | RelayError::CompletionFailed | RelayError::ServerError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        (self.status(), Json(RelayReply::new(self.to_string()))).into_response()
    }
}
