//! Execution events streamed by the agent runtime
//!
//! Invoking an agent for one turn yields a lazy, finite sequence of
//! `ExecutionEvent`s. Intermediate events may carry partial text or no
//! content at all; the authoritative reply is the text of the *last*
//! event that is final and carries non-empty content.

use serde::{Deserialize, Serialize};

use super::content::Content;

/// One unit of a streamed agent response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionEvent {
    /// Name of the agent that produced this event
    pub author: String,

    /// Whether this event closes the turn's response
    pub is_final: bool,

    /// Content payload, absent for status-only events
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
}

impl ExecutionEvent {
    /// Create a partial (non-final) text event
    pub fn partial(author: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            is_final: false,
            content: Some(Content::model_text(text)),
        }
    }

    /// Create a final text event
    pub fn final_response(author: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            is_final: true,
            content: Some(Content::model_text(text)),
        }
    }

    /// Create a final event with no content
    pub fn final_empty(author: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            is_final: true,
            content: None,
        }
    }

    /// Authoritative reply text carried by this event
    ///
    /// Returns `Some` only for a final event whose first content part has
    /// non-empty text. Anything else is discardable for reply purposes.
    pub fn final_text(&self) -> Option<&str> {
        if !self.is_final {
            return None;
        }
        self.content.as_ref()?.first_text()
    }
}
