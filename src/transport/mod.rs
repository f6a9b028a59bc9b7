//! Conversation-history transport
//!
//! This module models the history the chat transport carries on every
//! round-trip, plus the session marker codec that smuggles a session id
//! through it as an invisible leading entry:
//! - `history` - Raw, untrusted turn-pair history
//! - `marker` - Encode/decode of the `__SID__:` session marker

pub mod history;
pub mod marker;

pub use history::RawHistory;
pub use marker::SESSION_MARKER_PREFIX;
