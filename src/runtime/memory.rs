//! In-memory session store
//!
//! The default `SessionService`: sessions live in a map for the lifetime
//! of the process. Suitable for a single-process gateway where durability
//! across restarts is not required.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::core::{GatewayError, GatewayResult};

use super::content::Content;
use super::session_service::{SessionRecord, SessionService};

/// Composite key for one session
type SessionKey = (String, String, String);

/// Session store backed by a process-local map
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionService {
    sessions: Arc<RwLock<HashMap<SessionKey, SessionRecord>>>,
}

impl InMemorySessionService {
    /// Create an empty in-memory session store
    pub fn new() -> Self {
        Self::default()
    }

    fn key(app_name: &str, user_id: &str, session_id: &str) -> SessionKey {
        (
            app_name.to_string(),
            user_id.to_string(),
            session_id.to_string(),
        )
    }
}

#[async_trait]
impl SessionService for InMemorySessionService {
    async fn create_session(
        &self,
        app_name: &str,
        user_id: &str,
        session_id: &str,
    ) -> GatewayResult<SessionRecord> {
        let mut sessions = self.sessions.write().await;
        let key = Self::key(app_name, user_id, session_id);

        if sessions.contains_key(&key) {
            return Err(GatewayError::SessionExists(session_id.to_string()));
        }

        let record = SessionRecord::new(app_name, user_id, session_id);
        sessions.insert(key, record.clone());
        tracing::debug!(session_id, "Created in-memory session");
        Ok(record)
    }

    async fn get_session(
        &self,
        app_name: &str,
        user_id: &str,
        session_id: &str,
    ) -> GatewayResult<Option<SessionRecord>> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(&Self::key(app_name, user_id, session_id)).cloned())
    }

    async fn append_message(
        &self,
        app_name: &str,
        user_id: &str,
        session_id: &str,
        message: Content,
    ) -> GatewayResult<()> {
        let mut sessions = self.sessions.write().await;
        let record = sessions
            .get_mut(&Self::key(app_name, user_id, session_id))
            .ok_or_else(|| GatewayError::SessionNotFound(session_id.to_string()))?;

        record.messages.push(message);
        record.touch();
        Ok(())
    }

    async fn list_sessions(&self, app_name: &str, user_id: &str) -> GatewayResult<Vec<String>> {
        let sessions = self.sessions.read().await;
        Ok(sessions
            .keys()
            .filter(|(app, user, _)| app == app_name && user == user_id)
            .map(|(_, _, session_id)| session_id.clone())
            .collect())
    }

    async fn delete_session(
        &self,
        app_name: &str,
        user_id: &str,
        session_id: &str,
    ) -> GatewayResult<()> {
        let mut sessions = self.sessions.write().await;
        sessions.remove(&Self::key(app_name, user_id, session_id));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_get() {
        let store = InMemorySessionService::new();

        let record = store.create_session("app", "user", "session-1").await.unwrap();
        assert_eq!(record.session_id, "session-1");

        let fetched = store.get_session("app", "user", "session-1").await.unwrap();
        assert!(fetched.is_some());
        assert!(fetched.unwrap().messages.is_empty());
    }

    #[tokio::test]
    async fn test_create_duplicate_fails() {
        let store = InMemorySessionService::new();

        store.create_session("app", "user", "session-1").await.unwrap();
        let err = store.create_session("app", "user", "session-1").await;
        assert!(matches!(err, Err(GatewayError::SessionExists(_))));
    }

    #[tokio::test]
    async fn test_append_message() {
        let store = InMemorySessionService::new();
        store.create_session("app", "user", "session-1").await.unwrap();

        store
            .append_message("app", "user", "session-1", Content::user_text("Hello"))
            .await
            .unwrap();
        store
            .append_message("app", "user", "session-1", Content::model_text("Hi"))
            .await
            .unwrap();

        let record = store
            .get_session("app", "user", "session-1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.messages.len(), 2);
        assert_eq!(record.messages[0].role, "user");
        assert_eq!(record.messages[1].role, "model");
    }

    #[tokio::test]
    async fn test_append_to_missing_session() {
        let store = InMemorySessionService::new();

        let err = store
            .append_message("app", "user", "nope", Content::user_text("Hello"))
            .await;
        assert!(matches!(err, Err(GatewayError::SessionNotFound(_))));
    }

    #[tokio::test]
    async fn test_list_is_scoped_to_app_and_user() {
        let store = InMemorySessionService::new();
        store.create_session("app", "user", "session-1").await.unwrap();
        store.create_session("app", "user", "session-2").await.unwrap();
        store.create_session("other", "user", "session-3").await.unwrap();

        let mut ids = store.list_sessions("app", "user").await.unwrap();
        ids.sort();
        assert_eq!(ids, vec!["session-1", "session-2"]);
    }

    #[tokio::test]
    async fn test_delete_session() {
        let store = InMemorySessionService::new();
        store.create_session("app", "user", "session-1").await.unwrap();

        store.delete_session("app", "user", "session-1").await.unwrap();
        assert!(store
            .get_session("app", "user", "session-1")
            .await
            .unwrap()
            .is_none());

        // Deleting again is fine
        store.delete_session("app", "user", "session-1").await.unwrap();
    }
}
