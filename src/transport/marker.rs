//! Session marker codec
//!
//! The chat transport has no native slot for session metadata, so the
//! session id rides inside the history itself: a sentinel first entry of
//! the form `["__SID__:<session-id>", ""]`. The empty second field keeps
//! the entry from rendering as a real turn in the chat widget.
//!
//! The marker is only ever honored at index 0. The transport is expected
//! to preserve entry order across round-trips; a marker that drifts to a
//! later index is treated as a real turn and ignored.

use serde_json::{json, Value};

use super::history::{first_field, RawHistory};

/// Prefix that identifies the first field of a session marker entry.
pub const SESSION_MARKER_PREFIX: &str = "__SID__:";

/// Encode a session id as a marker entry suitable for index 0 of a history.
pub fn encode(session_id: &str) -> Value {
    json!([format!("{}{}", SESSION_MARKER_PREFIX, session_id), ""])
}

/// Decode a session id out of a raw history.
///
/// Inspects index 0 only. If the first entry's first field starts with the
/// marker prefix, the id after the prefix is extracted (it may be empty)
/// and the marker entry is removed from the returned history. Otherwise
/// the history is returned unchanged with no id.
///
/// Malformed input (absent history, empty history, non-array entries,
/// non-string fields) never fails; it decodes to no id.
pub fn decode(history: Option<&[Value]>) -> (Option<String>, RawHistory) {
    let history = match history {
        Some(entries) if !entries.is_empty() => entries,
        _ => return (None, Vec::new()),
    };

    match first_field(&history[0]).and_then(|text| text.strip_prefix(SESSION_MARKER_PREFIX)) {
        Some(id) => (Some(id.to_string()), history[1..].to_vec()),
        None => (None, history.to_vec()),
    }
}
