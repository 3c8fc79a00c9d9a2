//! HTTP client for the OCR endpoint.

use std::time::Duration;

use reqwest::multipart;
use thiserror::Error;

use crate::models::{ExtractionResult, NormalizedImage};

/// Errors from one extraction call. Each user action maps to exactly one
/// outbound request, so these are never retried internally.
#[derive(Debug, Error)]
pub enum OcrClientError {
    #[error("OCR endpoint unreachable: {0}")]
    Unreachable(String),

    #[error("OCR endpoint did not respond within {0} seconds")]
    Timeout(u64),

    #[error("OCR endpoint returned HTTP {status}: {detail}")]
    Endpoint { status: u16, detail: String },
}

/// Client for the OCR endpoint's single `POST /ocr` operation.
///
/// The endpoint base URL is passed per call because the reviewer can edit
/// it in the UI; the underlying connection pool is shared.
#[derive(Clone)]
pub struct OcrClient {
    http: reqwest::Client,
    timeout_secs: u64,
}

impl OcrClient {
    /// Create a client with the given request timeout.
    pub fn new(timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            timeout_secs: timeout.as_secs(),
        }
    }

    /// Send one image to `{base_url}/ocr` and parse the JSON response.
    ///
    /// The response must be a JSON object with at least a `text` field;
    /// everything else in it is passed through untouched.
    pub async fn extract(
        &self,
        base_url: &str,
        image: &NormalizedImage,
    ) -> Result<ExtractionResult, OcrClientError> {
        let url = format!("{}/ocr", base_url.trim_end_matches('/'));

        let part = multipart::Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(&image.mime_type)
            // mime_type comes from the normalizer's closed set of valid types
            .expect("normalized image media type is always valid");
        let form = multipart::Form::new().part("file", part);

        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.classify_transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OcrClientError::Endpoint {
                status: status.as_u16(),
                detail: error_detail(&body, status.as_u16()),
            });
        }

        let raw: serde_json::Value = response.json().await.map_err(|e| {
            if e.is_timeout() {
                OcrClientError::Timeout(self.timeout_secs)
            } else {
                OcrClientError::Endpoint {
                    status: status.as_u16(),
                    detail: format!("response was not valid JSON: {}", e),
                }
            }
        })?;

        let text = raw
            .get("text")
            .and_then(|v| v.as_str())
            .ok_or_else(|| OcrClientError::Endpoint {
                status: status.as_u16(),
                detail: "response is missing the 'text' field".to_string(),
            })?
            .trim()
            .to_string();

        Ok(ExtractionResult::new(text, raw))
    }

    fn classify_transport_error(&self, e: reqwest::Error) -> OcrClientError {
        if e.is_timeout() {
            OcrClientError::Timeout(self.timeout_secs)
        } else {
            OcrClientError::Unreachable(e.to_string())
        }
    }
}

/// Pull a human-readable detail out of an error body.
///
/// FastAPI-style endpoints wrap messages as `{"detail": "..."}`; surface
/// that string verbatim. Anything else is reported as-is.
fn error_detail(body: &str, status: u16) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(detail) = value.get("detail").and_then(|d| d.as_str()) {
            return detail.to_string();
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("HTTP {}", status)
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::json;

    fn test_image() -> NormalizedImage {
        NormalizedImage {
            file_name: "invoice.png".to_string(),
            mime_type: "image/png".to_string(),
            bytes: vec![0x89, b'P', b'N', b'G'],
        }
    }

    /// Bind a mock endpoint on an ephemeral port and return its base URL.
    async fn spawn_mock(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_extract_success() {
        let body = json!({"text": "INVOICE #123", "raw": {"pages": 1}});
        let response = body.clone();
        let router = Router::new().route(
            "/ocr",
            post(move || {
                let response = response.clone();
                async move { Json(response) }
            }),
        );
        let base = spawn_mock(router).await;

        let client = OcrClient::new(Duration::from_secs(5));
        let result = client.extract(&base, &test_image()).await.unwrap();

        assert_eq!(result.text, "INVOICE #123");
        assert_eq!(result.raw, body);
    }

    #[tokio::test]
    async fn test_extract_trims_text() {
        let router = Router::new().route(
            "/ocr",
            post(|| async { Json(json!({"text": "  INVOICE #123\n"})) }),
        );
        let base = spawn_mock(router).await;

        let client = OcrClient::new(Duration::from_secs(5));
        let result = client.extract(&base, &test_image()).await.unwrap();
        assert_eq!(result.text, "INVOICE #123");
    }

    #[tokio::test]
    async fn test_endpoint_error_detail_verbatim() {
        let router = Router::new().route(
            "/ocr",
            post(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"detail": "model OOM"})),
                )
            }),
        );
        let base = spawn_mock(router).await;

        let client = OcrClient::new(Duration::from_secs(5));
        match client.extract(&base, &test_image()).await {
            Err(OcrClientError::Endpoint { status, detail }) => {
                assert_eq!(status, 500);
                assert_eq!(detail, "model OOM");
            }
            other => panic!("expected Endpoint error, got {:?}", other.map(|r| r.text)),
        }
    }

    #[tokio::test]
    async fn test_timeout() {
        let router = Router::new().route(
            "/ocr",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(10)).await;
                Json(json!({"text": "too late"}))
            }),
        );
        let base = spawn_mock(router).await;

        let client = OcrClient::new(Duration::from_millis(200));
        match client.extract(&base, &test_image()).await {
            Err(OcrClientError::Timeout(_)) => {}
            other => panic!("expected Timeout, got {:?}", other.map(|r| r.text)),
        }
    }

    #[tokio::test]
    async fn test_unreachable() {
        // Grab an ephemeral port, then close the listener so nothing answers.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = OcrClient::new(Duration::from_secs(2));
        match client
            .extract(&format!("http://{}", addr), &test_image())
            .await
        {
            Err(OcrClientError::Unreachable(_)) => {}
            other => panic!("expected Unreachable, got {:?}", other.map(|r| r.text)),
        }
    }

    #[tokio::test]
    async fn test_missing_text_field() {
        let router = Router::new().route(
            "/ocr",
            post(|| async { Json(json!({"result": "no text key here"})) }),
        );
        let base = spawn_mock(router).await;

        let client = OcrClient::new(Duration::from_secs(5));
        match client.extract(&base, &test_image()).await {
            Err(OcrClientError::Endpoint { status, detail }) => {
                assert_eq!(status, 200);
                assert!(detail.contains("text"));
            }
            other => panic!("expected Endpoint error, got {:?}", other.map(|r| r.text)),
        }
    }

    #[test]
    fn test_error_detail_extraction() {
        assert_eq!(error_detail(r#"{"detail": "model OOM"}"#, 500), "model OOM");
        assert_eq!(error_detail("plain failure text", 502), "plain failure text");
        assert_eq!(error_detail("", 503), "HTTP 503");
        // JSON without a detail string falls back to the raw body
        assert_eq!(error_detail(r#"{"code": 7}"#, 500), r#"{"code": 7}"#);
    }
}
