//! File-backed session store
//!
//! Persists each session as one JSON file under
//! `<base_dir>/<app_name>/<user_id>/<session_id>.json`, so sessions
//! survive process restarts. Writes rewrite the whole record; session
//! message logs are small enough that this stays cheap.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::core::{GatewayError, GatewayResult};

use super::content::Content;
use super::session_service::{SessionRecord, SessionService};

/// Default directory for session storage
const SESSIONS_DIR: &str = "sessions";

/// Session store backed by per-session JSON files
#[derive(Debug, Clone)]
pub struct FileSessionService {
    base_dir: PathBuf,
}

impl FileSessionService {
    /// Create a file store rooted at the default directory
    pub fn new() -> Self {
        Self {
            base_dir: PathBuf::from(SESSIONS_DIR),
        }
    }

    /// Create a file store rooted at a custom directory
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: dir.into(),
        }
    }

    /// Directory holding all sessions for one app/user pair
    fn user_dir(&self, app_name: &str, user_id: &str) -> PathBuf {
        self.base_dir.join(app_name).join(user_id)
    }

    /// File path for one session record
    fn session_path(&self, app_name: &str, user_id: &str, session_id: &str) -> PathBuf {
        self.user_dir(app_name, user_id)
            .join(format!("{}.json", session_id))
    }

    fn write_record(&self, record: &SessionRecord) -> GatewayResult<()> {
        let dir = self.user_dir(&record.app_name, &record.user_id);
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }

        let path = self.session_path(&record.app_name, &record.user_id, &record.session_id);
        let file = File::create(&path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, record)?;
        Ok(())
    }

    fn read_record(&self, path: &Path) -> GatewayResult<SessionRecord> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let record = serde_json::from_reader(reader)?;
        Ok(record)
    }
}

impl Default for FileSessionService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionService for FileSessionService {
    async fn create_session(
        &self,
        app_name: &str,
        user_id: &str,
        session_id: &str,
    ) -> GatewayResult<SessionRecord> {
        let path = self.session_path(app_name, user_id, session_id);
        if path.exists() {
            return Err(GatewayError::SessionExists(session_id.to_string()));
        }

        let record = SessionRecord::new(app_name, user_id, session_id);
        self.write_record(&record)?;
        tracing::debug!(session_id, path = %path.display(), "Created session file");
        Ok(record)
    }

    async fn get_session(
        &self,
        app_name: &str,
        user_id: &str,
        session_id: &str,
    ) -> GatewayResult<Option<SessionRecord>> {
        let path = self.session_path(app_name, user_id, session_id);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(self.read_record(&path)?))
    }

    async fn append_message(
        &self,
        app_name: &str,
        user_id: &str,
        session_id: &str,
        message: Content,
    ) -> GatewayResult<()> {
        let path = self.session_path(app_name, user_id, session_id);
        if !path.exists() {
            return Err(GatewayError::SessionNotFound(session_id.to_string()));
        }

        let mut record = self.read_record(&path)?;
        record.messages.push(message);
        record.touch();
        self.write_record(&record)
    }

    async fn list_sessions(&self, app_name: &str, user_id: &str) -> GatewayResult<Vec<String>> {
        let dir = self.user_dir(app_name, user_id);
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut sessions = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) == Some("json") {
                if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                    sessions.push(stem.to_string());
                }
            }
        }
        Ok(sessions)
    }

    async fn delete_session(
        &self,
        app_name: &str,
        user_id: &str,
        session_id: &str,
    ) -> GatewayResult<()> {
        let path = self.session_path(app_name, user_id, session_id);
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> (FileSessionService, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionService::with_dir(temp_dir.path());
        (store, temp_dir)
    }

    #[tokio::test]
    async fn test_create_and_reload() {
        let (store, _temp) = create_test_store();

        store.create_session("app", "user", "session-1").await.unwrap();
        store
            .append_message("app", "user", "session-1", Content::user_text("Hello"))
            .await
            .unwrap();

        let record = store
            .get_session("app", "user", "session-1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.messages.len(), 1);
        assert_eq!(record.messages[0].first_text(), Some("Hello"));
    }

    #[tokio::test]
    async fn test_create_duplicate_fails() {
        let (store, _temp) = create_test_store();

        store.create_session("app", "user", "session-1").await.unwrap();
        let err = store.create_session("app", "user", "session-1").await;
        assert!(matches!(err, Err(GatewayError::SessionExists(_))));
    }

    #[tokio::test]
    async fn test_get_missing_session() {
        let (store, _temp) = create_test_store();
        let fetched = store.get_session("app", "user", "nope").await.unwrap();
        assert!(fetched.is_none());
    }

    #[tokio::test]
    async fn test_append_to_missing_session() {
        let (store, _temp) = create_test_store();

        let err = store
            .append_message("app", "user", "nope", Content::user_text("Hello"))
            .await;
        assert!(matches!(err, Err(GatewayError::SessionNotFound(_))));
    }

    #[tokio::test]
    async fn test_list_and_delete() {
        let (store, _temp) = create_test_store();
        store.create_session("app", "user", "session-1").await.unwrap();
        store.create_session("app", "user", "session-2").await.unwrap();

        let mut ids = store.list_sessions("app", "user").await.unwrap();
        ids.sort();
        assert_eq!(ids, vec!["session-1", "session-2"]);

        store.delete_session("app", "user", "session-1").await.unwrap();
        let ids = store.list_sessions("app", "user").await.unwrap();
        assert_eq!(ids, vec!["session-2"]);
    }

    #[tokio::test]
    async fn test_list_for_unknown_user() {
        let (store, _temp) = create_test_store();
        let ids = store.list_sessions("app", "nobody").await.unwrap();
        assert!(ids.is_empty());
    }
}
