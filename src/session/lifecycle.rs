//! Session lifecycle manager
//!
//! Decides, for each incoming turn, whether the history already carries a
//! usable session id or whether a fresh one must be minted and
//! registered. The output is everything downstream needs: the id, the
//! marker-free history, and the history the transport should persist.

use std::sync::Arc;

use serde_json::Value;
use uuid::Uuid;

use crate::bridge;
use crate::runtime::SessionService;
use crate::transport::history::RawHistory;
use crate::transport::marker;

/// Prefix of every minted session id
pub const SESSION_ID_PREFIX: &str = "session-";

/// Outcome of resolving one turn's session
#[derive(Debug, Clone)]
pub struct ResolvedTurn {
    /// Session id for this turn (decoded or freshly minted)
    pub session_id: String,

    /// History with the marker entry stripped, for downstream consumers
    pub cleaned_history: RawHistory,

    /// History the transport should hold for the next round-trip
    ///
    /// Carries a leading marker entry only when a fresh id was minted;
    /// when an id was reused the transport already holds the marker.
    pub history_to_persist: RawHistory,

    /// Whether a new session id was minted this turn
    pub minted: bool,
}

/// Per-turn session identity resolution
pub struct SessionLifecycle {
    sessions: Arc<dyn SessionService>,
    app_name: String,
    user_id: String,
}

impl SessionLifecycle {
    /// Create a lifecycle manager over the shared session store
    pub fn new(
        sessions: Arc<dyn SessionService>,
        app_name: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            sessions,
            app_name: app_name.into(),
            user_id: user_id.into(),
        }
    }

    /// Mint a collision-resistant session id
    pub fn mint_session_id() -> String {
        format!("{}{}", SESSION_ID_PREFIX, Uuid::new_v4())
    }

    /// Resolve the session for one turn
    ///
    /// Never fails: malformed history degrades to "no session found" and
    /// a fresh id, and registration problems are logged and swallowed
    /// (the runtime creates sessions lazily on first use anyway).
    pub fn resolve(&self, history: Option<&[Value]>) -> ResolvedTurn {
        let (decoded, cleaned) = marker::decode(history);

        // An empty id is a stripped marker with nothing in it: unusable
        match decoded.filter(|id| !id.is_empty()) {
            Some(session_id) => {
                tracing::debug!(session_id = %session_id, "Reusing session id from history marker");
                ResolvedTurn {
                    session_id,
                    history_to_persist: cleaned.clone(),
                    cleaned_history: cleaned,
                    minted: false,
                }
            }
            None => {
                let session_id = Self::mint_session_id();
                tracing::info!(session_id = %session_id, "Minted new visitor session");

                self.register(&session_id);

                let mut history_to_persist = vec![marker::encode(&session_id)];
                history_to_persist.extend(cleaned.iter().cloned());

                ResolvedTurn {
                    session_id,
                    cleaned_history: cleaned,
                    history_to_persist,
                    minted: true,
                }
            }
        }
    }

    /// Best-effort registration of a freshly minted id
    fn register(&self, session_id: &str) {
        let sessions = self.sessions.clone();
        let app_name = self.app_name.clone();
        let user_id = self.user_id.clone();
        let id = session_id.to_string();

        let outcome = bridge::run_blocking(async move {
            sessions.create_session(&app_name, &user_id, &id).await
        });

        match outcome {
            Ok(Ok(_)) => {}
            Ok(Err(err)) => {
                tracing::warn!(session_id, error = %err, "Session registration failed; continuing");
            }
            Err(err) => {
                tracing::warn!(session_id, error = %err, "Bridge failed during registration; continuing");
            }
        }
    }
}

impl std::fmt::Debug for SessionLifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionLifecycle")
            .field("app_name", &self.app_name)
            .field("user_id", &self.user_id)
            .finish()
    }
}
