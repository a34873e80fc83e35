//! Manus client: OpenAI-compatible chat plus image generation.

use crate::http::HttpTransport;
use crate::openai::{chat_body, normalize_chat, normalize_image};
use compact_str::CompactString;
use reqwest::Client;
use serde_json::json;
use tcore::{GenerationRequest, NormalizedResult, ProviderError};

/// Default Manus API base.
pub const DEFAULT_BASE: &str = "https://api.manus.ai/v1";

/// Manus provider client.
#[derive(Debug, Clone)]
pub struct Manus {
    transport: HttpTransport,
    base: String,
    model: CompactString,
}

impl Manus {
    pub fn new(
        client: Client,
        key: &str,
        model: impl Into<CompactString>,
        base_url: Option<&str>,
    ) -> Result<Self, ProviderError> {
        Ok(Self {
            transport: HttpTransport::bearer(client, key)?,
            base: base_url.unwrap_or(DEFAULT_BASE).trim_end_matches('/').to_owned(),
            model: model.into(),
        })
    }

    /// Chat completion over the OpenAI-compatible endpoint.
    pub async fn chat(&self, request: &GenerationRequest) -> Result<NormalizedResult, ProviderError> {
        let body = chat_body(&self.model, request);
        let value = self
            .transport
            .post_json(&format!("{}/chat/completions", self.base), &body)
            .await?;
        normalize_chat(value)
    }

    /// Image generation. Normalizes `data[0].url`.
    pub async fn image(&self, request: &GenerationRequest) -> Result<NormalizedResult, ProviderError> {
        let body = json!({
            "model": self.model,
            "prompt": request.prompt,
            "n": 1,
        });
        let value = self
            .transport
            .post_json(&format!("{}/images/generations", self.base), &body)
            .await?;
        normalize_image(value)
    }
}
