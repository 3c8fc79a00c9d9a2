//! JSON API handlers: the headless variant of the review flow.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::models::{ExtractionResult, InvoiceExtraction, UploadedDocument};
use crate::normalize::NormalizeError;
use crate::ocr::OcrClientError;
use crate::server::AppState;

use super::helpers::{normalize_blocking, read_upload};

/// Error response in the endpoint's own `{"detail": ...}` shape.
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    pub(super) fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({"detail": self.detail}))).into_response()
    }
}

impl From<NormalizeError> for ApiError {
    fn from(e: NormalizeError) -> Self {
        let status = match e {
            NormalizeError::UnsupportedFormat(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            NormalizeError::Rasterization(_) => StatusCode::UNPROCESSABLE_ENTITY,
        };
        Self::new(status, e.to_string())
    }
}

impl From<OcrClientError> for ApiError {
    fn from(e: OcrClientError) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, e.to_string())
    }
}

pub async fn api_health() -> Json<serde_json::Value> {
    Json(json!({"status": "ok"}))
}

/// POST /ocr - normalize the upload, forward it, return the result with
/// the endpoint's raw payload passed through untouched.
pub async fn api_ocr_extract(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ExtractionResult>, ApiError> {
    let result = run_pipeline(&state, multipart).await?;
    Ok(Json(result))
}

/// POST /ocr/invoice - same pipeline, then parse the extracted text as
/// strict invoice JSON.
pub async fn api_ocr_invoice(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<InvoiceExtraction>, ApiError> {
    let result = run_pipeline(&state, multipart).await?;

    let invoice = InvoiceExtraction::from_text(&result.text).map_err(|e| {
        ApiError::new(
            StatusCode::BAD_GATEWAY,
            format!("model did not return valid invoice JSON: {}", e),
        )
    })?;

    Ok(Json(invoice))
}

async fn run_pipeline(
    state: &AppState,
    multipart: Multipart,
) -> Result<ExtractionResult, ApiError> {
    let document = read_document(multipart).await?;
    let image = normalize_blocking(document, state.settings.raster_dpi).await?;
    let result = state
        .client
        .extract(&state.settings.endpoint_url, &image)
        .await?;
    Ok(result)
}

async fn read_document(multipart: Multipart) -> Result<UploadedDocument, ApiError> {
    let upload = read_upload(multipart)
        .await
        .map_err(|message| ApiError::new(StatusCode::BAD_REQUEST, message))?;

    match upload.document {
        Some(document) if !document.is_empty() => Ok(document),
        Some(_) => Err(ApiError::new(
            StatusCode::BAD_REQUEST,
            "Uploaded file is empty",
        )),
        None => Err(ApiError::new(
            StatusCode::BAD_REQUEST,
            "Expected a multipart 'file' field",
        )),
    }
}
