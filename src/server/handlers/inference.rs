//! Inference server handlers: the local stand-in for the OCR endpoint.
//!
//! The engine binary owns the model; these handlers only move bytes to a
//! temp file, invoke it, and wrap stdout as `{"text": ...}`.

use std::path::Path;

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;

use crate::ocr::EngineError;
use crate::server::AppState;

use super::api::ApiError;
use super::helpers::read_upload;

pub async fn inference_health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "engine_available": state.engine.is_available(),
        "engine": state.engine.availability_hint(),
    }))
}

/// POST /ocr - run the local engine on one uploaded image.
pub async fn inference_ocr(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<serde_json::Value>, ApiError> {
    let upload = read_upload(multipart)
        .await
        .map_err(|message| ApiError::new(StatusCode::BAD_REQUEST, message))?;

    let document = match upload.document {
        Some(document) if !document.is_empty() => document,
        _ => {
            return Err(ApiError::new(
                StatusCode::BAD_REQUEST,
                "Expected a non-empty multipart 'file' field",
            ))
        }
    };

    // The engine reads from a path, so the upload goes through a temp file
    // that lives until the subprocess is done with it.
    let suffix = Path::new(&document.file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e))
        .unwrap_or_else(|| ".png".to_string());

    let temp = tempfile::Builder::new()
        .prefix("invocr-")
        .suffix(&suffix)
        .tempfile()
        .map_err(|e| {
            ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, format!("temp file: {}", e))
        })?;

    std::fs::write(temp.path(), &document.bytes).map_err(|e| {
        ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, format!("temp file: {}", e))
    })?;

    let engine = state.engine.clone();
    let image_path = temp.path().to_path_buf();

    let text = tokio::task::spawn_blocking(move || engine.extract_text(&image_path))
        .await
        .map_err(|e| {
            ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("worker task failed: {}", e),
            )
        })?
        .map_err(|e| match e {
            EngineError::NotAvailable(hint) => {
                ApiError::new(StatusCode::SERVICE_UNAVAILABLE, hint)
            }
            other => {
                tracing::error!("OCR engine invocation failed: {}", other);
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, other.to_string())
            }
        })?;

    Ok(Json(json!({"text": text})))
}
