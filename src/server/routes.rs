//! Router configuration for the three servers.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use super::handlers;
use super::AppState;

/// Uploads larger than this are rejected outright.
const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Review UI: HTML pages plus the preview image and stylesheet.
pub fn create_ui_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::review_home))
        .route("/upload", post(handlers::upload_document))
        .route("/extract", post(handlers::trigger_extract))
        .route("/preview/:session_id", get(handlers::preview_image))
        .route("/static/style.css", get(handlers::serve_css))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}

/// JSON API: the headless extraction pipeline.
pub fn create_api_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::api_health))
        .route("/ocr", post(handlers::api_ocr_extract))
        .route("/ocr/invoice", post(handlers::api_ocr_invoice))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Inference server: the local OCR endpoint.
pub fn create_inference_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::inference_health))
        .route("/ocr", post(handlers::inference_ocr))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}
