//! File relay endpoint (`POST /api/files`).
//!
//! Two strictly sequential provider calls: upload the file, then ask a
//! question that references the returned file id. A failed upload stops
//! before the completion. Nothing is retried. The uploaded file is left on
//! the provider unless `delete_uploaded_files` is enabled.

use super::{RelayError, RelayReply, RelayState};
use crate::prompts::{file_question, FILE_SYSTEM_PROMPT};
use crate::providers::{FileUpload, Message};
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::Json;

/// Parts of the multipart form the relay cares about
#[derive(Debug, Default)]
struct FileForm {
    file: Option<FileUpload>,
    question: Option<String>,
}

async fn read_form(mut multipart: Multipart) -> Result<FileForm, RelayError> {
    let mut form = FileForm::default();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::warn!("File relay could not read multipart field: {}", e);
        RelayError::NoFile
    })? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" if form.file.is_none() => {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let content_type = field
                    .content_type()
                    .map(str::to_string)
                    .unwrap_or_else(|| {
                        mime_guess::from_path(&file_name)
                            .first_or_octet_stream()
                            .to_string()
                    });
                let data = field.bytes().await.map_err(|e| {
                    tracing::warn!("File relay could not read file part: {}", e);
                    RelayError::NoFile
                })?;

                // Browsers send an empty, unnamed part when nothing was picked.
                if !data.is_empty() {
                    form.file = Some(FileUpload::new(file_name, content_type, data));
                }
            }
            "question" => {
                let question = field.text().await.map_err(|e| {
                    tracing::warn!("File relay could not read question: {}", e);
                    RelayError::NoFile
                })?;
                form.question = Some(question);
            }
            other => {
                tracing::debug!(field = %other, "File relay ignoring multipart field");
            }
        }
    }

    Ok(form)
}

/// Upload a file to the provider and ask a question about it
pub async fn relay_file(
    State(state): State<RelayState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<RelayReply>, RelayError> {
    let multipart = multipart.map_err(|e| {
        tracing::warn!("File relay rejected non-multipart request: {}", e);
        RelayError::NoFile
    })?;

    let form = read_form(multipart).await?;
    let file = form.file.ok_or(RelayError::NoFile)?;
    let settings = state.settings();
    let question = form
        .question
        .filter(|question| !question.trim().is_empty())
        .unwrap_or_else(|| settings.default_question.clone());

    tracing::info!(
        file_name = %file.file_name,
        content_type = %file.content_type,
        size_bytes = file.len(),
        "File relay request"
    );

    let file_id = state.provider().upload_file(file).await.map_err(|e| {
        tracing::error!(error = ?e, "File relay upload failed");
        RelayError::UploadFailed
    })?;

    let messages = [
        Message::system(FILE_SYSTEM_PROMPT),
        Message::user(file_question(&question, &file_id)),
    ];
    let completion = state
        .provider()
        .complete(&messages, Some(settings.file_model.as_str()))
        .await;

    if settings.delete_uploaded_files {
        if let Err(e) = state.provider().delete_file(&file_id).await {
            tracing::warn!(file_id = %file_id, error = ?e, "Failed to delete uploaded file");
        }
    } else if completion.is_err() {
        tracing::warn!(file_id = %file_id, "Uploaded file left on provider after failed completion");
    }

    match completion {
        Ok(reply) => Ok(Json(RelayReply::new(reply))),
        Err(e) => {
            tracing::error!(file_id = %file_id, error = ?e, "File relay completion failed");
            Err(RelayError::CompletionFailed)
        }
    }
}
