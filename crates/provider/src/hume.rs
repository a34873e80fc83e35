//! Hume client: TTS whose success body is the raw audio bytes.
//!
//! Authentication travels in the `X-Hume-Api-Key` header instead of a
//! Bearer token.

use crate::http::HttpTransport;
use reqwest::Client;
use serde_json::json;
use tcore::{GenerationRequest, NormalizedResult, ProviderError};

/// Default Hume API base.
pub const DEFAULT_BASE: &str = "https://api.hume.ai/v0";

/// Hume provider client.
#[derive(Debug, Clone)]
pub struct Hume {
    transport: HttpTransport,
    base: String,
}

impl Hume {
    pub fn new(client: Client, key: &str, base_url: Option<&str>) -> Result<Self, ProviderError> {
        Ok(Self {
            transport: HttpTransport::header(client, "X-Hume-Api-Key", key)?,
            base: base_url.unwrap_or(DEFAULT_BASE).trim_end_matches('/').to_owned(),
        })
    }

    /// Text-to-speech. The response body is the audio itself.
    pub async fn speech(&self, request: &GenerationRequest) -> Result<NormalizedResult, ProviderError> {
        let body = json!({
            "text": request.prompt,
            "voice": "ITO",
            "speed": 1.0,
        });
        let (data, mime) = self
            .transport
            .post_bytes(&format!("{}/tts", self.base), &body)
            .await?;
        Ok(NormalizedResult::Audio { data, mime })
    }
}
