//! Staging a file for the next outgoing message
//!
//! A staged file is read into memory when it is picked (via `/attach` or by
//! dropping a file onto the terminal, which pastes its path). Images get a
//! `file://` preview reference; anything else is shown by name only.

use crate::error::{AcmeBotError, Result};
use bytes::Bytes;
use std::path::{Path, PathBuf};

/// A file waiting to be sent with the next message
#[derive(Debug, Clone)]
pub struct StagedFile {
    /// File name shown in the conversation and sent to the relay
    pub name: String,
    /// Where the file was read from
    pub path: PathBuf,
    /// MIME type guessed from the file extension
    pub content_type: String,
    /// File contents
    pub data: Bytes,
    /// Local preview reference, images only
    pub preview: Option<String>,
}

impl StagedFile {
    /// Read a file from disk and stage it
    ///
    /// # Errors
    ///
    /// Returns `AcmeBotError::Attachment` if the path is not a readable file
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use acme_bot::session::StagedFile;
    ///
    /// let staged = StagedFile::from_path("diagram.png").unwrap();
    /// assert!(staged.is_image());
    /// assert!(staged.preview.is_some());
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(AcmeBotError::Attachment(format!("{} is not a file", path.display())).into());
        }

        let data = std::fs::read(path).map_err(|e| {
            AcmeBotError::Attachment(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        let content_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        let preview = if content_type.starts_with("image/") {
            preview_reference(path)
        } else {
            None
        };

        tracing::debug!(
            name = %name,
            content_type = %content_type,
            size_bytes = data.len(),
            "Staged file"
        );

        Ok(Self {
            name,
            path: path.to_path_buf(),
            content_type,
            data: Bytes::from(data),
            preview,
        })
    }

    /// Whether the file is an image
    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }
}

fn preview_reference(path: &Path) -> Option<String> {
    let absolute = path.canonicalize().ok()?;
    url::Url::from_file_path(absolute)
        .ok()
        .map(|url| url.to_string())
}

/// Interpret pasted terminal text as a dropped file
///
/// Terminals paste a dropped file as its path, sometimes quoted, with
/// backslash-escaped spaces, or as a `file://` URL. Returns the path when
/// it names an existing file.
pub fn dropped_path(text: &str) -> Option<PathBuf> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.contains('\n') {
        return None;
    }

    let unquoted = trimmed
        .strip_prefix('\'')
        .and_then(|t| t.strip_suffix('\''))
        .or_else(|| {
            trimmed
                .strip_prefix('"')
                .and_then(|t| t.strip_suffix('"'))
        })
        .unwrap_or(trimmed);

    let path = if unquoted.starts_with("file://") {
        url::Url::parse(unquoted).ok()?.to_file_path().ok()?
    } else {
        PathBuf::from(unquoted.replace("\\ ", " "))
    };

    path.is_file().then_some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_file, temp_dir};

    #[test]
    fn test_stage_text_file_has_no_preview() {
        let dir = temp_dir();
        let path = create_test_file(&dir, "notes.txt", "hello");

        let staged = StagedFile::from_path(&path).unwrap();
        assert_eq!(staged.name, "notes.txt");
        assert_eq!(staged.content_type, "text/plain");
        assert_eq!(&staged.data[..], b"hello");
        assert!(!staged.is_image());
        assert!(staged.preview.is_none());
    }

    #[test]
    fn test_stage_image_has_file_url_preview() {
        let dir = temp_dir();
        let path = create_test_file(&dir, "chart.png", "not really a png");

        let staged = StagedFile::from_path(&path).unwrap();
        assert!(staged.is_image());
        let preview = staged.preview.unwrap();
        assert!(preview.starts_with("file://"));
        assert!(preview.ends_with("chart.png"));
    }

    #[test]
    fn test_stage_unknown_extension_is_octet_stream() {
        let dir = temp_dir();
        let path = create_test_file(&dir, "blob.zzzunknown", "x");
        let staged = StagedFile::from_path(&path).unwrap();
        assert_eq!(staged.content_type, "application/octet-stream");
    }

    #[test]
    fn test_stage_missing_file_fails() {
        let dir = temp_dir();
        let err = StagedFile::from_path(dir.path().join("missing.pdf")).unwrap_err();
        assert!(err.to_string().contains("is not a file"));
    }

    #[test]
    fn test_stage_directory_fails() {
        let dir = temp_dir();
        assert!(StagedFile::from_path(dir.path()).is_err());
    }

    #[test]
    fn test_dropped_path_variants() {
        let dir = temp_dir();
        let path = create_test_file(&dir, "my report.pdf", "%PDF");
        let plain = path.to_string_lossy().to_string();

        assert_eq!(dropped_path(&plain), Some(path.clone()));
        assert_eq!(dropped_path(&format!("'{}'", plain)), Some(path.clone()));
        assert_eq!(dropped_path(&format!("\"{}\"  ", plain)), Some(path.clone()));
        assert_eq!(
            dropped_path(&plain.replace(' ', "\\ ")),
            Some(path.clone())
        );

        let url = url::Url::from_file_path(&path).unwrap().to_string();
        assert_eq!(dropped_path(&url), Some(path));
    }

    #[test]
    fn test_dropped_path_ignores_plain_text() {
        assert_eq!(dropped_path("What is our vacation policy?"), None);
        assert_eq!(dropped_path(""), None);
        assert_eq!(dropped_path("/definitely/not/here.txt"), None);
    }
}
