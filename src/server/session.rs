//! Session-scoped reviewer state.
//!
//! Each reviewer session owns exactly one document / preview / result
//! triple, modeled as an explicit struct rather than ambient globals so
//! concurrent reviewers stay isolated. The invariant is one NormalizedImage
//! and one ExtractionResult per session at most; every new upload or
//! extraction replaces the previous one.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{ExtractionResult, NormalizedImage, UploadedDocument};

/// Sessions kept in memory before the oldest gets evicted.
const MAX_SESSIONS: usize = 256;

/// One reviewer's private state.
#[derive(Debug, Clone)]
pub struct ReviewSession {
    pub id: Uuid,
    /// Endpoint override the reviewer typed into the UI, if any.
    pub endpoint_url: Option<String>,
    pub document: Option<UploadedDocument>,
    pub preview: Option<NormalizedImage>,
    pub result: Option<ExtractionResult>,
    /// Error from the last upload or extraction attempt. Cleared on the
    /// next success; showing it never discards a previous result.
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ReviewSession {
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            endpoint_url: None,
            document: None,
            preview: None,
            result: None,
            error: None,
            created_at: Utc::now(),
        }
    }

    /// The endpoint this session talks to: its own override, or the default.
    pub fn endpoint<'a>(&'a self, default: &'a str) -> &'a str {
        self.endpoint_url.as_deref().unwrap_or(default)
    }
}

/// In-memory session map shared by the UI handlers.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, ReviewSession>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, id: Uuid) -> Option<ReviewSession> {
        self.inner.read().await.get(&id).cloned()
    }

    pub async fn get_or_create(&self, id: Uuid) -> ReviewSession {
        if let Some(session) = self.get(id).await {
            return session;
        }
        ReviewSession::new(id)
    }

    /// Store a session, evicting the oldest one past the cap.
    pub async fn upsert(&self, session: ReviewSession) {
        let mut map = self.inner.write().await;
        map.insert(session.id, session);

        if map.len() > MAX_SESSIONS {
            if let Some(oldest) = map
                .values()
                .min_by_key(|s| s.created_at)
                .map(|s| s.id)
            {
                map.remove(&oldest);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_or_create_does_not_insert() {
        let store = SessionStore::new();
        let id = Uuid::new_v4();

        let session = store.get_or_create(id).await;
        assert_eq!(session.id, id);
        assert!(store.get(id).await.is_none());

        store.upsert(session).await;
        assert!(store.get(id).await.is_some());
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let store = SessionStore::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        let mut session_a = ReviewSession::new(a);
        session_a.error = Some("boom".to_string());
        store.upsert(session_a).await;
        store.upsert(ReviewSession::new(b)).await;

        assert_eq!(store.get(a).await.unwrap().error.as_deref(), Some("boom"));
        assert!(store.get(b).await.unwrap().error.is_none());
    }

    #[test]
    fn test_endpoint_override() {
        let mut session = ReviewSession::new(Uuid::new_v4());
        assert_eq!(session.endpoint("http://default"), "http://default");

        session.endpoint_url = Some("http://other".to_string());
        assert_eq!(session.endpoint("http://default"), "http://other");
    }
}
