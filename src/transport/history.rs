//! Raw conversation history as delivered by the chat transport
//!
//! The transport hands the gateway an ordered list of turn-pairs as plain
//! JSON. Nothing about its shape can be trusted: entries may be missing
//! fields, carry non-string values, or be absent entirely on the first
//! turn. History is therefore kept as raw `serde_json::Value` entries and
//! inspected tolerantly instead of being deserialized into a strict type.

use serde_json::{json, Value};

/// Ordered list of turn-pairs as received from (and returned to) the transport.
///
/// A well-formed entry is a two-element array `[userText, agentText]`.
pub type RawHistory = Vec<Value>;

/// Build a well-formed history entry from a user/agent text pair.
pub fn turn(user: impl Into<String>, agent: impl Into<String>) -> Value {
    json!([user.into(), agent.into()])
}

/// First field of a history entry, if the entry is an array whose first
/// element is a string.
///
/// Returns `None` for anything else; malformed entries are never an error.
pub fn first_field(entry: &Value) -> Option<&str> {
    entry.as_array()?.first()?.as_str()
}
