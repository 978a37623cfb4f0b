//! Text relay endpoint (`POST /api/chat`).

use super::{RelayError, RelayReply, RelayState};
use crate::prompts::CHAT_SYSTEM_PROMPT;
use crate::providers::Message;
use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::Json;
use bytes::Bytes;

/// Pull a non-empty string `message` out of a JSON body
fn parse_message(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    value
        .get("message")?
        .as_str()
        .filter(|message| !message.is_empty())
        .map(str::to_string)
}

/// Forward a single user message to the provider
///
/// The body is parsed by hand so every malformed request gets the same
/// `Invalid input` reply instead of axum's JSON rejection text.
pub async fn relay_text(
    State(state): State<RelayState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<RelayReply>, RelayError> {
    let body = body.map_err(|e| {
        tracing::warn!("Text relay could not read request body: {}", e);
        RelayError::InvalidInput
    })?;

    let message = parse_message(&body).ok_or_else(|| {
        tracing::debug!("Text relay rejected body without a string message");
        RelayError::InvalidInput
    })?;

    tracing::info!(chars = message.chars().count(), "Text relay request");

    let messages = [Message::system(CHAT_SYSTEM_PROMPT), Message::user(message)];
    match state.provider().complete(&messages, None).await {
        Ok(reply) => Ok(Json(RelayReply::new(reply))),
        Err(e) => {
            tracing::error!(error = ?e, "Text relay completion failed");
            Err(RelayError::ServerError)
        }
    }
}
