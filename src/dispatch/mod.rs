//! Agent dispatch facade
//!
//! `AgentDispatcher` turns "message, agent key, session id" into a reply
//! string, whatever happens underneath: it resolves the agent, builds a
//! fresh runner, drives the event stream through the bridge, and keeps
//! the last final event with non-empty text. Every failure path resolves
//! to a diagnostic string reply; the caller never sees a fault.

pub mod registry;

use std::sync::Arc;

use futures::StreamExt;

use crate::bridge;
use crate::core::GatewayError;
use crate::runtime::{Content, Runner, SessionService};

pub use registry::{AgentEntry, AgentRegistry};

/// Reply used when the event stream ends without a qualifying final event
pub const NO_RESPONSE_REPLY: &str = "(no response)";

/// Dispatches one turn to the selected agent
pub struct AgentDispatcher {
    registry: Arc<AgentRegistry>,
    sessions: Arc<dyn SessionService>,
    app_name: String,
    user_id: String,
}

impl AgentDispatcher {
    /// Create a dispatcher over the agent registry and shared session store
    pub fn new(
        registry: Arc<AgentRegistry>,
        sessions: Arc<dyn SessionService>,
        app_name: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            registry,
            sessions,
            app_name: app_name.into(),
            user_id: user_id.into(),
        }
    }

    /// Run one turn and return the reply text
    ///
    /// Total: always returns a string. Stream faults surface as
    /// `[Agent runtime error] …`, everything else (unknown key, bridge
    /// setup, panics) as `[Error invoking agent] …`.
    pub fn dispatch(&self, message: &str, agent_key: &str, session_id: &str) -> String {
        let entry = match self.registry.get(agent_key) {
            Some(entry) => entry,
            None => {
                let err = GatewayError::UnknownAgent(agent_key.to_string());
                tracing::error!(agent_key, "Dispatch requested for unregistered agent");
                return format!("[Error invoking agent] {}", err);
            }
        };

        let runner = Runner::new(
            entry.key.clone(),
            entry.behavior.clone(),
            self.sessions.clone(),
            self.app_name.clone(),
        );
        let content = Content::user_text(message);
        let user_id = self.user_id.clone();
        let session_id = session_id.to_string();

        tracing::debug!(agent = %entry.key, session_id = %session_id, "Dispatching turn");

        match bridge::run_blocking(async move {
            final_reply(runner, &user_id, &session_id, content).await
        }) {
            Ok(reply) => reply,
            Err(err) => format!("[Error invoking agent] {}", err),
        }
    }
}

impl std::fmt::Debug for AgentDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentDispatcher")
            .field("agents", &self.registry.keys())
            .field("app_name", &self.app_name)
            .finish()
    }
}

/// Scan the event stream and keep the last authoritative reply
async fn final_reply(
    runner: Runner,
    user_id: &str,
    session_id: &str,
    message: Content,
) -> String {
    let mut reply = NO_RESPONSE_REPLY.to_string();
    let mut events = runner.run_async(user_id, session_id, message);

    while let Some(event) = events.next().await {
        match event {
            Ok(event) => {
                if let Some(text) = event.final_text() {
                    reply = text.to_string();
                }
            }
            Err(err) => return format!("[Agent runtime error] {}", err),
        }
    }

    reply
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::{
        EchoAgent, ExecutionEvent, InMemorySessionService, ScriptedAgent,
    };

    fn dispatcher_with(entry: AgentEntry) -> AgentDispatcher {
        let mut registry = AgentRegistry::new();
        registry.register(entry);
        AgentDispatcher::new(
            Arc::new(registry),
            Arc::new(InMemorySessionService::new()),
            "test-app",
            "visitor",
        )
    }

    fn scripted(key: &str, agent: ScriptedAgent) -> AgentEntry {
        AgentEntry::new(key, key, "scripted", Arc::new(agent))
    }

    #[test]
    fn test_dispatch_returns_final_reply() {
        let dispatcher = dispatcher_with(AgentEntry::new(
            "triage",
            "Triage",
            "echoes",
            Arc::new(EchoAgent::new("triage")),
        ));

        let reply = dispatcher.dispatch("Hello", "triage", "session-1");
        assert_eq!(reply, "Hello! You said: Hello");
    }

    #[test]
    fn test_last_qualifying_final_event_wins() {
        let dispatcher = dispatcher_with(scripted(
            "x",
            ScriptedAgent::new(vec![
                ExecutionEvent::final_response("x", "first"),
                ExecutionEvent::partial("x", "noise"),
                ExecutionEvent::final_response("x", "second"),
            ]),
        ));

        assert_eq!(dispatcher.dispatch("go", "x", "session-1"), "second");
    }

    #[test]
    fn test_empty_stream_yields_placeholder() {
        let dispatcher = dispatcher_with(scripted("x", ScriptedAgent::new(vec![])));
        assert_eq!(dispatcher.dispatch("go", "x", "session-1"), NO_RESPONSE_REPLY);
    }

    #[test]
    fn test_only_non_final_events_yield_placeholder() {
        let dispatcher = dispatcher_with(scripted(
            "x",
            ScriptedAgent::new(vec![
                ExecutionEvent::partial("x", "working"),
                ExecutionEvent::final_empty("x"),
            ]),
        ));

        assert_eq!(dispatcher.dispatch("go", "x", "session-1"), NO_RESPONSE_REPLY);
    }

    #[test]
    fn test_stream_fault_becomes_diagnostic_reply() {
        let dispatcher = dispatcher_with(scripted(
            "x",
            ScriptedAgent::new(vec![ExecutionEvent::partial("x", "thinking")])
                .failing_with("backend unreachable"),
        ));

        let reply = dispatcher.dispatch("go", "x", "session-1");
        assert!(reply.starts_with("[Agent runtime error]"));
        assert!(reply.contains("backend unreachable"));
    }

    #[test]
    fn test_unknown_agent_becomes_diagnostic_reply() {
        let dispatcher = dispatcher_with(scripted("x", ScriptedAgent::new(vec![])));

        let reply = dispatcher.dispatch("go", "nope", "session-1");
        assert!(reply.starts_with("[Error invoking agent]"));
        assert!(reply.contains("Unknown agent: nope"));
    }

    #[test]
    fn test_fault_after_final_event_still_reports_fault() {
        // A fault anywhere in the stream outranks earlier finals
        let dispatcher = dispatcher_with(scripted(
            "x",
            ScriptedAgent::new(vec![ExecutionEvent::final_response("x", "almost")])
                .failing_with("late fault"),
        ));

        let reply = dispatcher.dispatch("go", "x", "session-1");
        assert!(reply.starts_with("[Agent runtime error]"));
    }

    #[tokio::test]
    async fn test_dispatch_callable_from_async_context() {
        // Exercises the bridge's fallback path end to end
        let dispatcher = dispatcher_with(AgentEntry::new(
            "triage",
            "Triage",
            "echoes",
            Arc::new(EchoAgent::new("triage")),
        ));

        let reply = dispatcher.dispatch("Hello", "triage", "session-1");
        assert_eq!(reply, "Hello! You said: Hello");
    }
}
