//! Agent behavior boundary
//!
//! The decision logic that turns a message into a reply is an external
//! capability: the gateway only needs "run this turn, stream back
//! events". `AgentBehavior` is that seam. Real deployments plug an LLM
//! pipeline in here; the implementations in this module are deliberately
//! small (a console echo agent and a scripted agent for tests).

use futures::stream::{self, BoxStream, StreamExt};

use crate::core::{GatewayError, GatewayResult};

use super::content::Content;
use super::event::ExecutionEvent;

/// Everything a behavior gets to see for one turn
#[derive(Debug, Clone)]
pub struct TurnContext {
    /// Application identity
    pub app_name: String,

    /// User identity
    pub user_id: String,

    /// Session the turn belongs to
    pub session_id: String,

    /// Messages recorded for this session before this turn
    pub history: Vec<Content>,

    /// The user message for this turn
    pub new_message: Content,
}

/// Opaque per-turn agent capability
///
/// Implementations produce a finite stream of execution events for one
/// turn. The stream owns everything it needs; it must not borrow from the
/// behavior so the runner can drive it after the call returns.
pub trait AgentBehavior: Send + Sync {
    /// Run one turn, yielding execution events
    fn run(&self, turn: TurnContext) -> BoxStream<'static, GatewayResult<ExecutionEvent>>;
}

/// Behavior that echoes the user message back
///
/// Greets returning visitors based on the recorded history, which makes
/// session continuity visible in the console front-end.
#[derive(Debug, Clone)]
pub struct EchoAgent {
    name: String,
}

impl EchoAgent {
    /// Create an echo behavior with the given agent name
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl AgentBehavior for EchoAgent {
    fn run(&self, turn: TurnContext) -> BoxStream<'static, GatewayResult<ExecutionEvent>> {
        let name = self.name.clone();
        let text = turn
            .new_message
            .first_text()
            .unwrap_or_default()
            .to_string();

        let greeting = if turn.history.is_empty() {
            "Hello!"
        } else {
            "Welcome back."
        };
        let reply = format!("{} You said: {}", greeting, text);

        stream::iter(vec![
            Ok(ExecutionEvent::partial(name.clone(), "…")),
            Ok(ExecutionEvent::final_response(name, reply)),
        ])
        .boxed()
    }
}

/// Behavior that replays a fixed sequence of events
///
/// Useful for tests and demos: the event sequence (and an optional
/// trailing failure) is chosen up front, independent of the message.
#[derive(Debug, Clone, Default)]
pub struct ScriptedAgent {
    events: Vec<ExecutionEvent>,
    trailing_error: Option<String>,
}

impl ScriptedAgent {
    /// Create a behavior that emits the given events in order
    pub fn new(events: Vec<ExecutionEvent>) -> Self {
        Self {
            events,
            trailing_error: None,
        }
    }

    /// Fail the stream with the given message after the scripted events
    pub fn failing_with(mut self, message: impl Into<String>) -> Self {
        self.trailing_error = Some(message.into());
        self
    }
}

impl AgentBehavior for ScriptedAgent {
    fn run(&self, _turn: TurnContext) -> BoxStream<'static, GatewayResult<ExecutionEvent>> {
        let mut items: Vec<GatewayResult<ExecutionEvent>> =
            self.events.iter().cloned().map(Ok).collect();
        if let Some(message) = &self.trailing_error {
            items.push(Err(GatewayError::agent(message.clone())));
        }
        stream::iter(items).boxed()
    }
}
