//! OCR extraction: the HTTP client for the endpoint, and the local engine
//! the bundled inference server shells out to.
//!
//! The client issues exactly one request per user action. There is no retry
//! policy, no backoff, and no circuit breaking; every failure is surfaced
//! to the caller immediately.

mod client;
mod engine;

pub use client::{OcrClient, OcrClientError};
pub use engine::{EngineError, OcrEngine};
