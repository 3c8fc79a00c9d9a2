//! Web servers for the invoice OCR pipeline.
//!
//! Three processes share this module:
//! - the review UI (upload, preview, extract, inspect),
//! - the JSON API (the same pipeline without the HTML),
//! - the inference server (the local OCR endpoint).

mod assets;
mod handlers;
mod routes;
mod session;
mod templates;

pub use routes::{create_api_router, create_inference_router, create_ui_router};
pub use session::{ReviewSession, SessionStore};

use std::sync::Arc;

use crate::config::Settings;
use crate::ocr::{OcrClient, OcrEngine};

/// Shared state for all three servers.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub client: OcrClient,
    pub sessions: SessionStore,
    pub engine: Arc<OcrEngine>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        let client = OcrClient::new(settings.request_timeout);
        let engine = Arc::new(OcrEngine::from_settings(&settings.engine));

        Self {
            settings: Arc::new(settings),
            client,
            sessions: SessionStore::new(),
            engine,
        }
    }
}

/// Start the review UI server.
pub async fn serve_ui(settings: &Settings) -> anyhow::Result<()> {
    let app = create_ui_router(AppState::new(settings.clone()));

    let listener = tokio::net::TcpListener::bind(&settings.ui_bind).await?;
    tracing::info!("Starting review UI at http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}

/// Start the JSON API server.
pub async fn serve_api(settings: &Settings) -> anyhow::Result<()> {
    let app = create_api_router(AppState::new(settings.clone()));

    let listener = tokio::net::TcpListener::bind(&settings.api_bind).await?;
    tracing::info!("Starting API server at http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}

/// Start the inference server.
pub async fn serve_inference(settings: &Settings) -> anyhow::Result<()> {
    let state = AppState::new(settings.clone());
    if !state.engine.is_available() {
        tracing::warn!("{}", state.engine.availability_hint());
    }
    let app = create_inference_router(state);

    let listener = tokio::net::TcpListener::bind(&settings.inference_bind).await?;
    tracing::info!(
        "Starting inference server at http://{}",
        listener.local_addr()?
    );
    axum::serve(listener, app).await?;

    Ok(())
}

/// Start all three servers in one process.
pub async fn serve_all(settings: &Settings) -> anyhow::Result<()> {
    tokio::try_join!(
        serve_ui(settings),
        serve_api(settings),
        serve_inference(settings)
    )?;
    Ok(())
}
