//! Generation capabilities.

use serde::{Deserialize, Serialize};

/// A category of generative request.
///
/// Every provider entry in the fallback configuration serves exactly one
/// capability; the dispatcher consults the matching chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Chat completion.
    Chat,
    /// Image generation.
    Image,
    /// Text-to-speech.
    Speech,
    /// Asynchronous (job-style) video generation.
    Video,
}

impl Capability {
    /// All capabilities in chain order.
    pub const ALL: [Capability; 4] = [Self::Chat, Self::Image, Self::Speech, Self::Video];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Chat => "chat",
            Self::Image => "image",
            Self::Speech => "speech",
            Self::Video => "video",
        }
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
