//! The canonical result every provider response normalizes into.

use crate::TaskId;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

/// A normalized provider result. Exactly one variant per successful call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizedResult {
    /// Plain text (chat completion).
    Text(String),
    /// URL or data-URI referencing a generated image.
    ImageRef(String),
    /// Raw synthesized audio.
    Audio {
        /// Decoded audio bytes.
        data: Vec<u8>,
        /// MIME type, e.g. `audio/mpeg`.
        mime: String,
    },
    /// Handle for an asynchronous generation job.
    TaskHandle(TaskId),
}

impl NormalizedResult {
    /// The text payload, if this is a `Text` result.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Encode an `Audio` result as a base64 data-URI for transport.
    pub fn into_data_uri(self) -> Option<String> {
        match self {
            Self::Audio { data, mime } => {
                Some(format!("data:{mime};base64,{}", STANDARD.encode(data)))
            }
            _ => None,
        }
    }
}
