//! Review surface handlers.
//!
//! State machine per session: idle -> extracting -> showing result or
//! showing error. Handlers follow a post/redirect/get shape so a refresh
//! never re-submits an extraction.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;
use uuid::Uuid;

use crate::config::validate_endpoint_url;
use crate::server::session::ReviewSession;
use crate::server::{assets, templates, AppState};

use super::helpers::{normalize_blocking, read_upload};

#[derive(Deserialize)]
pub struct HomeQuery {
    session: Option<String>,
}

/// Render the review page. Without a session parameter a fresh session id
/// is minted; it only enters the store once the reviewer uploads something.
pub async fn review_home(
    State(state): State<AppState>,
    Query(query): Query<HomeQuery>,
) -> Html<String> {
    let session = match query.session.as_deref().and_then(|s| Uuid::parse_str(s).ok()) {
        Some(id) => state.sessions.get_or_create(id).await,
        None => ReviewSession::new(Uuid::new_v4()),
    };

    Html(templates::review_page(&session, &state.settings.endpoint_url))
}

/// Accept an upload, validate and normalize it for preview, and redirect
/// back to the session's page.
pub async fn upload_document(State(state): State<AppState>, multipart: Multipart) -> Response {
    let upload = match read_upload(multipart).await {
        Ok(upload) => upload,
        Err(message) => return (StatusCode::BAD_REQUEST, message).into_response(),
    };

    let session_id = match upload.session.as_deref().and_then(|s| Uuid::parse_str(s).ok()) {
        Some(id) => id,
        None => return (StatusCode::BAD_REQUEST, "Missing session field").into_response(),
    };

    let mut session = state.sessions.get_or_create(session_id).await;

    match upload.document {
        Some(document) if !document.is_empty() => {
            match normalize_blocking(document.clone(), state.settings.raster_dpi).await {
                Ok(preview) => {
                    session.document = Some(document);
                    session.preview = Some(preview);
                    session.error = None;
                }
                Err(e) => {
                    // Nothing usable was produced; drop the document so the
                    // extract action cannot run against a bad upload.
                    session.document = None;
                    session.preview = None;
                    session.error = Some(e.to_string());
                }
            }
        }
        _ => {
            session.error = Some("Uploaded file is empty.".to_string());
        }
    }

    state.sessions.upsert(session).await;
    Redirect::to(&format!("/?session={}", session_id)).into_response()
}

#[derive(Deserialize)]
pub struct ExtractForm {
    session: String,
    endpoint: String,
}

/// The explicit trigger action: normalize, then one call to the endpoint.
///
/// Any failure along the way surfaces as a message and leaves the prior
/// result untouched; the session returns to idle either way.
pub async fn trigger_extract(
    State(state): State<AppState>,
    Form(form): Form<ExtractForm>,
) -> Response {
    let session_id = match Uuid::parse_str(&form.session) {
        Ok(id) => id,
        Err(_) => return (StatusCode::BAD_REQUEST, "Invalid session field").into_response(),
    };

    let mut session = state.sessions.get_or_create(session_id).await;

    let endpoint = match validate_endpoint_url(form.endpoint.trim()) {
        Ok(url) => {
            session.endpoint_url = Some(url.clone());
            url
        }
        Err(e) => {
            session.error = Some(e.to_string());
            state.sessions.upsert(session).await;
            return Redirect::to(&format!("/?session={}", session_id)).into_response();
        }
    };

    let Some(document) = session.document.clone() else {
        session.error = Some("Upload a document first.".to_string());
        state.sessions.upsert(session).await;
        return Redirect::to(&format!("/?session={}", session_id)).into_response();
    };

    match normalize_blocking(document, state.settings.raster_dpi).await {
        Ok(image) => {
            session.preview = Some(image.clone());
            match state.client.extract(&endpoint, &image).await {
                Ok(result) => {
                    tracing::info!(session = %session_id, "extraction completed");
                    session.result = Some(result);
                    session.error = None;
                }
                Err(e) => {
                    session.error = Some(e.to_string());
                }
            }
        }
        Err(e) => {
            session.error = Some(e.to_string());
        }
    }

    state.sessions.upsert(session).await;
    Redirect::to(&format!("/?session={}", session_id)).into_response()
}

/// Serve the session's normalized image for the preview pane.
pub async fn preview_image(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Response {
    let Some(id) = Uuid::parse_str(&session_id).ok() else {
        return (StatusCode::NOT_FOUND, "No preview").into_response();
    };

    match state.sessions.get(id).await.and_then(|s| s.preview) {
        Some(preview) => (
            [(header::CONTENT_TYPE, preview.mime_type)],
            preview.bytes,
        )
            .into_response(),
        None => (StatusCode::NOT_FOUND, "No preview").into_response(),
    }
}

/// Serve the stylesheet.
pub async fn serve_css() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css")], assets::STYLE_CSS)
}
