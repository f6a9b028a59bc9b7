//! Agent runtime boundary
//!
//! This module defines the gateway's view of the agent runtime:
//! - `Content` / `Part` - Message payloads exchanged with agents
//! - `ExecutionEvent` - One unit of a streamed agent response
//! - `SessionService` - Storage backend for per-visitor sessions
//! - `AgentBehavior` - The opaque per-turn agent capability
//! - `Runner` - Binds a behavior to the shared session store
//!
//! Everything here is an injected dependency: the gateway never assumes a
//! process-wide runtime singleton.

pub mod behavior;
pub mod content;
pub mod event;
pub mod file;
pub mod memory;
pub mod runner;
pub mod session_service;

pub use behavior::{AgentBehavior, EchoAgent, ScriptedAgent, TurnContext};
pub use content::{Content, Part};
pub use event::ExecutionEvent;
pub use file::FileSessionService;
pub use memory::InMemorySessionService;
pub use runner::Runner;
pub use session_service::{SessionRecord, SessionService};
