//! invocr - local invoice OCR review console.
//!
//! A thin orchestration layer around a pretrained OCR model: an inference
//! server wraps the local OCR engine, an API server accepts uploads and
//! forwards them for extraction, and a review UI lets a human inspect
//! the results.

mod cli;
mod config;
mod models;
mod normalize;
mod ocr;
mod server;
mod utils;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (before anything else)
    let _ = dotenvy::dotenv();

    // Initialize logging based on verbosity
    let default_filter = if cli::is_verbose() {
        "invocr=info"
    } else {
        "invocr=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Run CLI
    cli::run().await
}
