//! Conversation turns.

use serde::{Deserialize, Serialize};

/// How many of the most recent turns are forwarded upstream.
///
/// Bounds the payload sent to providers; older turns are dropped from the
/// request body but remain in the caller's history.
pub const HISTORY_WINDOW: usize = 10;

/// A single turn in a conversation, most-recent-last in history order.
///
/// Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    /// Who produced this turn.
    pub role: Role,

    /// The text content of the turn.
    pub content: String,

    /// Inline images attached to the turn, as data-URI blobs, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,

    /// Unix timestamp (in seconds) of when the turn was created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<u64>,
}

impl ChatTurn {
    /// Create a new user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            images: Vec::new(),
            timestamp: None,
        }
    }

    /// Create a new assistant turn.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            images: Vec::new(),
            timestamp: None,
        }
    }

    /// Attach inline images to the turn.
    pub fn with_images(mut self, images: Vec<String>) -> Self {
        self.images = images;
        self
    }
}

/// The most recent `window` turns of a history, order preserved.
pub fn recent_turns(history: &[ChatTurn], window: usize) -> &[ChatTurn] {
    let start = history.len().saturating_sub(window);
    &history[start..]
}

/// The author of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The user role.
    #[default]
    User,
    /// The assistant role.
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}
