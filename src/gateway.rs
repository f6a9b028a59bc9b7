//! Chat turn orchestrator
//!
//! `ChatGateway` composes the session lifecycle and the dispatch facade
//! into one call per incoming turn. The gateway itself keeps no state
//! between turns: durability lives in the transport-held history (which
//! carries the session marker) and in the runtime's session store.

use serde_json::Value;
use std::sync::Arc;

use crate::config::GatewayConfig;
use crate::dispatch::{AgentDispatcher, AgentRegistry};
use crate::runtime::SessionService;
use crate::session::SessionLifecycle;
use crate::transport::history::RawHistory;

/// Result of one chat turn
#[derive(Debug, Clone)]
pub struct TurnReply {
    /// The agent's reply text (always present, possibly diagnostic)
    pub reply: String,

    /// History the transport should hold for the next round-trip
    ///
    /// Carries the session marker at index 0 when a new session was
    /// minted this turn. The displayed turn itself is appended by the
    /// transport, not by the gateway.
    pub history: RawHistory,
}

/// Per-turn entry point of the gateway
pub struct ChatGateway {
    lifecycle: SessionLifecycle,
    dispatcher: AgentDispatcher,
    default_agent: String,
}

impl ChatGateway {
    /// Wire a gateway from its configuration, agent set, and session store
    pub fn new(
        config: GatewayConfig,
        registry: AgentRegistry,
        sessions: Arc<dyn SessionService>,
    ) -> Self {
        let lifecycle =
            SessionLifecycle::new(sessions.clone(), &config.app_name, &config.user_id);
        let dispatcher = AgentDispatcher::new(
            Arc::new(registry),
            sessions,
            &config.app_name,
            &config.user_id,
        );

        Self {
            lifecycle,
            dispatcher,
            default_agent: config.default_agent,
        }
    }

    /// Handle one incoming turn
    ///
    /// Resolves the visitor's session from the raw history, dispatches
    /// the message to the selected agent (the configured default when
    /// `agent_key` is `None`), and returns the reply together with the
    /// history the transport should persist. Never fails; failure paths
    /// resolve to diagnostic reply text.
    pub fn handle_turn(
        &self,
        message: &str,
        history: Option<&[Value]>,
        agent_key: Option<&str>,
    ) -> TurnReply {
        let agent_key = agent_key.unwrap_or(&self.default_agent);
        let resolved = self.lifecycle.resolve(history);

        tracing::info!(
            agent_key,
            session_id = %resolved.session_id,
            minted = resolved.minted,
            "Handling chat turn"
        );

        let reply = self
            .dispatcher
            .dispatch(message, agent_key, &resolved.session_id);

        TurnReply {
            reply,
            history: resolved.history_to_persist,
        }
    }
}

impl std::fmt::Debug for ChatGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatGateway")
            .field("default_agent", &self.default_agent)
            .finish()
    }
}
