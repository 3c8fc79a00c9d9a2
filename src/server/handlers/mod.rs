//! HTTP request handlers for the three servers.

mod api;
mod helpers;
mod inference;
mod ui;

pub use api::{api_health, api_ocr_extract, api_ocr_invoice};
pub use inference::{inference_health, inference_ocr};
pub use ui::{preview_image, review_home, serve_css, trigger_extract, upload_document};
