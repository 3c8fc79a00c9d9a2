//! Result of one extraction round-trip against the OCR endpoint.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// What came back from the endpoint: the extracted text plus the full raw
/// payload, passed through to the reviewer untouched. Held in session state
/// until the next request overwrites it.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionResult {
    /// Extracted text (markdown-like).
    pub text: String,
    /// The endpoint's complete JSON response, verbatim.
    pub raw: serde_json::Value,
    /// When the extraction completed.
    pub extracted_at: DateTime<Utc>,
}

impl ExtractionResult {
    pub fn new(text: String, raw: serde_json::Value) -> Self {
        Self {
            text,
            raw,
            extracted_at: Utc::now(),
        }
    }
}
