//! Session store boundary of the agent runtime
//!
//! The runtime keeps one `SessionRecord` per visitor conversation, keyed
//! by `(app_name, user_id, session_id)`. The store is an injected
//! dependency: components receive an `Arc<dyn SessionService>` rather
//! than reaching for a process-wide singleton.
//!
//! The store serializes individual operations only. Two concurrent turns
//! for the same session id interleave their reads and appends with no
//! defined order; callers that need stronger guarantees must provide them
//! above this boundary.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::GatewayResult;

use super::content::Content;

/// Stored state of one visitor conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Application the session belongs to
    pub app_name: String,

    /// User identity the session belongs to
    pub user_id: String,

    /// Unique session identifier
    pub session_id: String,

    /// Message log, in arrival order
    pub messages: Vec<Content>,

    /// When the session was created
    pub created_at: DateTime<Utc>,

    /// When the session was last written
    pub updated_at: DateTime<Utc>,
}

impl SessionRecord {
    /// Create an empty record for a new session
    pub fn new(
        app_name: impl Into<String>,
        user_id: impl Into<String>,
        session_id: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            app_name: app_name.into(),
            user_id: user_id.into(),
            session_id: session_id.into(),
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Update the last-written timestamp
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Storage backend for agent sessions
#[async_trait]
pub trait SessionService: Send + Sync {
    /// Create a new, empty session
    ///
    /// Fails with `GatewayError::SessionExists` if the id is already taken.
    async fn create_session(
        &self,
        app_name: &str,
        user_id: &str,
        session_id: &str,
    ) -> GatewayResult<SessionRecord>;

    /// Fetch a session, or `None` if it does not exist
    async fn get_session(
        &self,
        app_name: &str,
        user_id: &str,
        session_id: &str,
    ) -> GatewayResult<Option<SessionRecord>>;

    /// Append a message to an existing session
    ///
    /// Fails with `GatewayError::SessionNotFound` if the session is absent.
    async fn append_message(
        &self,
        app_name: &str,
        user_id: &str,
        session_id: &str,
        message: Content,
    ) -> GatewayResult<()>;

    /// List the session ids stored for one app/user pair
    async fn list_sessions(&self, app_name: &str, user_id: &str) -> GatewayResult<Vec<String>>;

    /// Delete a session
    ///
    /// Deleting an absent session is not an error.
    async fn delete_session(
        &self,
        app_name: &str,
        user_id: &str,
        session_id: &str,
    ) -> GatewayResult<()>;
}
