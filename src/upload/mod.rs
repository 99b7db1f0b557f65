use axum::extract::multipart::{Multipart, MultipartError};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// The multipart field name carrying an uploaded picture.
pub const PICTURE_FIELD: &str = "picture";

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("failed to read multipart field: {0}")]
    Read(#[from] MultipartError),

    #[error("failed to persist uploaded file: {0}")]
    Write(#[from] std::io::Error),
}

/// Text fields plus the optional stored picture from one multipart form.
///
/// The picture, when present, is written to `upload_dir` under its original
/// filename *before* the form is handed to the controller, so the stored
/// reference exists by the time the owning record is inserted. A re-upload
/// of the same filename overwrites the previous file; stored paths stay
/// stable across re-uploads.
#[derive(Debug, Default)]
pub struct FormData {
    texts: HashMap<String, String>,
    /// Stored filename of the uploaded picture, if one was sent.
    pub picture: Option<String>,
}

impl FormData {
    pub async fn read(multipart: &mut Multipart, upload_dir: &Path) -> Result<Self, UploadError> {
        let mut form = FormData::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();

            let file_name = field.file_name().map(str::to_string);
            if name == PICTURE_FIELD {
                if let Some(file_name) = file_name.filter(|f| !f.is_empty()) {
                    let bytes = field.bytes().await?;
                    form.picture = Some(persist(upload_dir, &file_name, &bytes).await?);
                }
            } else {
                let value = field.text().await?;
                form.texts.insert(name, value);
            }
        }

        Ok(form)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.texts.get(name).map(String::as_str)
    }
}

/// Write an uploaded payload under `upload_dir`, returning the stored name.
/// A payload with an already-stored name silently overwrites the earlier
/// file.
async fn persist(upload_dir: &Path, file_name: &str, bytes: &[u8]) -> Result<String, UploadError> {
    let stored = sanitize_file_name(file_name);
    tokio::fs::write(upload_dir.join(&stored), bytes).await?;
    debug!("stored upload {} ({} bytes)", stored, bytes.len());
    Ok(stored)
}

/// Strip any client-supplied directory components from the filename.
fn sanitize_file_name(name: &str) -> String {
    Path::new(name)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_keeps_plain_names() {
        assert_eq!(sanitize_file_name("avatar.png"), "avatar.png");
    }

    #[test]
    fn sanitize_strips_directories() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("/tmp/pic.jpg"), "pic.jpg");
    }

    #[test]
    fn sanitize_handles_degenerate_names() {
        assert_eq!(sanitize_file_name(".."), "upload");
    }

    #[tokio::test]
    async fn persists_payload_under_original_name() {
        let dir = tempfile::tempdir().unwrap();

        let stored = persist(dir.path(), "avatar.png", b"payload").await.unwrap();

        assert_eq!(stored, "avatar.png");
        let on_disk = std::fs::read(dir.path().join("avatar.png")).unwrap();
        assert_eq!(on_disk, b"payload");
    }

    #[tokio::test]
    async fn same_name_upload_overwrites() {
        let dir = tempfile::tempdir().unwrap();

        persist(dir.path(), "pic.png", b"first").await.unwrap();
        persist(dir.path(), "pic.png", b"second").await.unwrap();

        let on_disk = std::fs::read(dir.path().join("pic.png")).unwrap();
        assert_eq!(on_disk, b"second");
    }

    #[tokio::test]
    async fn write_failure_surfaces_as_upload_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");

        let err = persist(&missing, "pic.png", b"payload").await.unwrap_err();
        assert!(matches!(err, UploadError::Write(_)));
    }
}
