//! Message content types exchanged with the agent runtime

use serde::{Deserialize, Serialize};

/// One piece of a content payload
///
/// Only text parts are produced by this gateway; the field stays optional
/// because the runtime may emit parts with no text at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    /// Text payload, if this part carries any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Part {
    /// Create a text part
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }
}

/// A role-attributed message payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    /// Author role ("user" or "model")
    pub role: String,

    /// Ordered content parts
    pub parts: Vec<Part>,
}

impl Content {
    /// Wrap a single user-authored text message
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            parts: vec![Part::text(text)],
        }
    }

    /// Wrap a single model-authored text message
    pub fn model_text(text: impl Into<String>) -> Self {
        Self {
            role: "model".to_string(),
            parts: vec![Part::text(text)],
        }
    }

    /// Text of the first part, if present and non-empty
    pub fn first_text(&self) -> Option<&str> {
        self.parts
            .first()
            .and_then(|part| part.text.as_deref())
            .filter(|text| !text.is_empty())
    }
}
