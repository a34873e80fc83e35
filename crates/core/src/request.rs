//! The capability request passed to the dispatcher.

use crate::{Capability, ChatTurn};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Which system-prompt template a chat request selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PromptMode {
    /// General study-assistant prompt.
    #[default]
    Standard,
    /// Step-by-step reasoning prompt; providers are asked for a structured
    /// JSON response.
    Reasoning,
}

/// A single generation request as handed to the fallback dispatcher.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// The capability this request targets.
    pub capability: Capability,

    /// Primary text payload: the chat message, image prompt, text to
    /// speak, or video topic.
    pub prompt: String,

    /// Image attachments as data-URI blobs, in order.
    pub images: Vec<String>,

    /// Prior conversation turns, most-recent-last. Only the most recent
    /// [`crate::HISTORY_WINDOW`] turns are forwarded upstream.
    pub history: Vec<ChatTurn>,

    /// System-prompt template selection.
    pub mode: PromptMode,

    /// Explicit provider override by entry name. When set, the dispatcher
    /// considers only the named entry.
    pub provider: Option<CompactString>,
}

impl GenerationRequest {
    /// Create a new request with just a primary payload.
    pub fn new(capability: Capability, prompt: impl Into<String>) -> Self {
        Self {
            capability,
            prompt: prompt.into(),
            images: Vec::new(),
            history: Vec::new(),
            mode: PromptMode::default(),
            provider: None,
        }
    }

    /// Attach image data-URIs to the request.
    pub fn with_images(mut self, images: Vec<String>) -> Self {
        self.images = images;
        self
    }

    /// Attach conversation history, most-recent-last.
    pub fn with_history(mut self, history: Vec<ChatTurn>) -> Self {
        self.history = history;
        self
    }

    /// Select the system-prompt template.
    pub fn with_mode(mut self, mode: PromptMode) -> Self {
        self.mode = mode;
        self
    }

    /// Pin the request to a single named provider entry.
    pub fn with_provider(mut self, name: impl Into<CompactString>) -> Self {
        self.provider = Some(name.into());
        self
    }

    /// Whether the request carries image attachments.
    ///
    /// Multimodal requests skip providers that cannot accept image input.
    pub fn multimodal(&self) -> bool {
        !self.images.is_empty()
    }
}
