//! Shared helpers for the relay integration tests

use acme_bot::config::Config;
use acme_bot::providers::create_provider;
use acme_bot::relay::{router, RelaySettings, RelayState};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::MockServer;

pub const BOUNDARY: &str = "acme-bot-test-boundary";

/// Configuration pointing the provider at a mock server's `/v1`
#[allow(dead_code)]
pub fn mock_config(server: &MockServer) -> Config {
    let mut config = Config::default();
    config.provider.api_base = format!("{}/v1", server.uri());
    config.provider.api_key = Some("sk-test".to_string());
    config
}

/// Relay router backed by the Moonshot provider at `config.provider.api_base`
#[allow(dead_code)]
pub fn relay_app(config: &Config) -> Router {
    let provider = create_provider(&config.provider).expect("provider");
    router(RelayState::new(provider, RelaySettings::from_config(config)))
}

/// Body of a successful provider completion
#[allow(dead_code)]
pub fn completion(content: &str) -> Value {
    json!({
        "id": "cmpl-1",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15 }
    })
}

/// Body of a successful provider upload
#[allow(dead_code)]
pub fn stored_file(id: &str) -> Value {
    json!({
        "id": id,
        "object": "file",
        "bytes": 8,
        "filename": "report.pdf",
        "purpose": "file-extract",
        "status": "ok"
    })
}

/// Build a multipart/form-data body by hand
///
/// `file` is `(file name, content type, bytes)`.
#[allow(dead_code)]
pub fn multipart_body(file: Option<(&str, &str, &[u8])>, question: Option<&str>) -> Vec<u8> {
    let mut body = Vec::new();
    if let Some((name, content_type, data)) = file {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                BOUNDARY, name, content_type
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    if let Some(question) = question {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"question\"\r\n\r\n{}\r\n",
                BOUNDARY, question
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

/// POST a JSON body to the text relay
#[allow(dead_code)]
pub fn chat_request(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header("content-type", "application/json")
        .body(body.into())
        .expect("request")
}

/// POST a multipart body to the file relay
#[allow(dead_code)]
pub fn files_request(body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/files")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .expect("request")
}

/// Run one request through the router and decode the JSON reply
#[allow(dead_code)]
pub async fn call(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let value = serde_json::from_slice(&bytes).expect("relay replies are JSON");
    (status, value)
}

/// Write a config file into a fresh temp dir
#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let temp_dir = tempfile::TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    std::fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}
