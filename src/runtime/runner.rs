//! Runner - binds an agent behavior to the shared session store
//!
//! A `Runner` is the per-agent execution resource: it knows which
//! behavior to invoke and which session store records the conversation.
//! Construction is cheap (a handful of `Arc` clones), so callers may
//! build a fresh runner per turn or cache one; correctness does not
//! depend on the choice.

use std::sync::Arc;

use futures::stream::{BoxStream, StreamExt};

use crate::core::{GatewayError, GatewayResult};

use super::behavior::{AgentBehavior, TurnContext};
use super::content::Content;
use super::event::ExecutionEvent;
use super::session_service::SessionService;

/// Per-agent execution resource
#[derive(Clone)]
pub struct Runner {
    agent_name: String,
    behavior: Arc<dyn AgentBehavior>,
    sessions: Arc<dyn SessionService>,
    app_name: String,
}

impl Runner {
    /// Create a runner for one agent, bound to the shared session store
    pub fn new(
        agent_name: impl Into<String>,
        behavior: Arc<dyn AgentBehavior>,
        sessions: Arc<dyn SessionService>,
        app_name: impl Into<String>,
    ) -> Self {
        Self {
            agent_name: agent_name.into(),
            behavior,
            sessions,
            app_name: app_name.into(),
        }
    }

    /// Name of the agent this runner executes
    pub fn agent_name(&self) -> &str {
        &self.agent_name
    }

    /// Execute one turn, yielding the behavior's execution events
    ///
    /// The session is created lazily on first use; a creation race with a
    /// concurrent turn for the same id is tolerated. The user message and
    /// the final reply are recorded in the session store. Concurrent
    /// turns for one session id interleave their store writes with no
    /// defined order.
    pub fn run_async(
        &self,
        user_id: &str,
        session_id: &str,
        new_message: Content,
    ) -> BoxStream<'static, GatewayResult<ExecutionEvent>> {
        let sessions = self.sessions.clone();
        let behavior = self.behavior.clone();
        let app_name = self.app_name.clone();
        let agent_name = self.agent_name.clone();
        let user_id = user_id.to_string();
        let session_id = session_id.to_string();

        async_stream::try_stream! {
            let history = match sessions.get_session(&app_name, &user_id, &session_id).await? {
                Some(record) => record.messages,
                None => {
                    tracing::debug!(session_id = %session_id, agent = %agent_name, "Session absent; creating lazily");
                    match sessions.create_session(&app_name, &user_id, &session_id).await {
                        Ok(record) => record.messages,
                        // Lost a creation race with a concurrent turn
                        Err(GatewayError::SessionExists(_)) => sessions
                            .get_session(&app_name, &user_id, &session_id)
                            .await?
                            .map(|record| record.messages)
                            .unwrap_or_default(),
                        Err(err) => Err(err)?,
                    }
                }
            };

            sessions
                .append_message(&app_name, &user_id, &session_id, new_message.clone())
                .await?;

            let turn = TurnContext {
                app_name: app_name.clone(),
                user_id: user_id.clone(),
                session_id: session_id.clone(),
                history,
                new_message,
            };

            let mut events = behavior.run(turn);
            let mut final_content: Option<Content> = None;

            while let Some(event) = events.next().await {
                let event = event?;
                if event.final_text().is_some() {
                    final_content = event.content.clone();
                }
                yield event;
            }

            // Record the authoritative reply, if the turn produced one
            if let Some(content) = final_content {
                sessions
                    .append_message(&app_name, &user_id, &session_id, content)
                    .await?;
            }
        }
        .boxed()
    }
}

impl std::fmt::Debug for Runner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runner")
            .field("agent_name", &self.agent_name)
            .field("app_name", &self.app_name)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::behavior::{EchoAgent, ScriptedAgent};
    use crate::runtime::memory::InMemorySessionService;

    fn echo_runner(sessions: Arc<InMemorySessionService>) -> Runner {
        Runner::new(
            "triage",
            Arc::new(EchoAgent::new("triage")),
            sessions,
            "test-app",
        )
    }

    #[tokio::test]
    async fn test_run_creates_session_lazily() {
        let sessions = Arc::new(InMemorySessionService::new());
        let runner = echo_runner(sessions.clone());

        let events: Vec<_> = runner
            .run_async("user", "session-1", Content::user_text("Hello"))
            .collect()
            .await;
        assert!(events.iter().all(|event| event.is_ok()));

        let record = sessions
            .get_session("test-app", "user", "session-1")
            .await
            .unwrap()
            .unwrap();
        // User message plus the final reply
        assert_eq!(record.messages.len(), 2);
        assert_eq!(record.messages[0].first_text(), Some("Hello"));
        assert_eq!(
            record.messages[1].first_text(),
            Some("Hello! You said: Hello")
        );
    }

    #[tokio::test]
    async fn test_run_passes_prior_history_to_behavior() {
        let sessions = Arc::new(InMemorySessionService::new());
        let runner = echo_runner(sessions.clone());

        let _: Vec<_> = runner
            .run_async("user", "session-1", Content::user_text("Hi"))
            .collect()
            .await;
        let events: Vec<_> = runner
            .run_async("user", "session-1", Content::user_text("Again"))
            .collect()
            .await;

        let last = events.last().unwrap().as_ref().unwrap();
        assert_eq!(last.final_text(), Some("Welcome back. You said: Again"));
    }

    #[tokio::test]
    async fn test_run_with_pre_registered_session() {
        let sessions = Arc::new(InMemorySessionService::new());
        sessions
            .create_session("test-app", "user", "session-1")
            .await
            .unwrap();

        let runner = echo_runner(sessions.clone());
        let events: Vec<_> = runner
            .run_async("user", "session-1", Content::user_text("Hello"))
            .collect()
            .await;
        assert!(events.iter().all(|event| event.is_ok()));
    }

    #[tokio::test]
    async fn test_behavior_error_surfaces_and_final_not_recorded() {
        let sessions = Arc::new(InMemorySessionService::new());
        let behavior = ScriptedAgent::new(vec![ExecutionEvent::partial("x", "thinking")])
            .failing_with("model backend down");
        let runner = Runner::new("x", Arc::new(behavior), sessions.clone(), "test-app");

        let events: Vec<_> = runner
            .run_async("user", "session-1", Content::user_text("Hello"))
            .collect()
            .await;

        assert!(events[0].is_ok());
        assert!(matches!(
            events.last().unwrap(),
            Err(GatewayError::AgentExecution(_))
        ));

        // Only the user message made it into the store
        let record = sessions
            .get_session("test-app", "user", "session-1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.messages.len(), 1);
    }

    #[tokio::test]
    async fn test_events_forwarded_in_order() {
        let sessions = Arc::new(InMemorySessionService::new());
        let behavior = ScriptedAgent::new(vec![
            ExecutionEvent::partial("x", "one"),
            ExecutionEvent::partial("x", "two"),
            ExecutionEvent::final_response("x", "three"),
        ]);
        let runner = Runner::new("x", Arc::new(behavior), sessions, "test-app");

        let events: Vec<_> = runner
            .run_async("user", "session-1", Content::user_text("go"))
            .collect()
            .await;

        let texts: Vec<_> = events
            .iter()
            .map(|event| {
                event
                    .as_ref()
                    .unwrap()
                    .content
                    .as_ref()
                    .unwrap()
                    .first_text()
                    .unwrap()
                    .to_string()
            })
            .collect();
        assert_eq!(texts, vec!["one", "two", "three"]);
    }
}
