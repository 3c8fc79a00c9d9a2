//! Shared helpers for multipart handling and blocking work.

use axum::extract::Multipart;

use crate::models::{NormalizedImage, UploadedDocument};
use crate::normalize::{normalize, NormalizeError};

/// Fields pulled out of a multipart upload request.
#[derive(Default)]
pub struct MultipartUpload {
    /// Session id carried as a hidden form field (UI only).
    pub session: Option<String>,
    /// The uploaded file, if one was present.
    pub document: Option<UploadedDocument>,
}

/// Drain a multipart body into its session and file parts.
pub async fn read_upload(mut multipart: Multipart) -> Result<MultipartUpload, String> {
    let mut upload = MultipartUpload::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| format!("Invalid multipart body: {}", e))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("session") => {
                upload.session = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| format!("Invalid session field: {}", e))?,
                );
            }
            Some("file") => {
                let file_name = field.file_name().map(str::to_string);
                // Fall back to guessing from the filename when the part
                // carries no content type of its own.
                let content_type = field.content_type().map(str::to_string).or_else(|| {
                    file_name
                        .as_deref()
                        .map(|name| mime_guess::from_path(name).first_or_octet_stream().to_string())
                });
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| format!("Failed to read upload: {}", e))?;
                upload.document =
                    Some(UploadedDocument::new(file_name, content_type, bytes.to_vec()));
            }
            _ => {}
        }
    }

    Ok(upload)
}

/// Normalize on a blocking task (PDF rasterization shells out to pdftoppm).
pub async fn normalize_blocking(
    document: UploadedDocument,
    dpi: u32,
) -> Result<NormalizedImage, NormalizeError> {
    tokio::task::spawn_blocking(move || normalize(&document, dpi))
        .await
        .map_err(|e| NormalizeError::Rasterization(format!("worker task failed: {}", e)))
        .and_then(|result| result)
}
