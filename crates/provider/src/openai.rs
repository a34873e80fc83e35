//! OpenAI client: chat completions, image generation, and TTS.
//!
//! One client serves three capabilities against the same base URL. The
//! chat body flattens the bounded conversation history into the message
//! array and inlines image attachments as `image_url` content parts.

use crate::http::HttpTransport;
use compact_str::CompactString;
use futures_core::Stream;
use futures_util::StreamExt;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use tcore::{
    GenerationRequest, HISTORY_WINDOW, NormalizedResult, PromptMode, ProviderError, recent_turns,
    system_prompt,
};

/// Default OpenAI API base.
pub const DEFAULT_BASE: &str = "https://api.openai.com/v1";

/// Token budget for chat completions.
const CHAT_MAX_TOKENS: u32 = 4096;

/// OpenAI (and OpenAI-compatible) provider client.
#[derive(Debug, Clone)]
pub struct OpenAi {
    transport: HttpTransport,
    base: String,
    model: CompactString,
}

impl OpenAi {
    /// Create a client with Bearer authentication against the default or
    /// an overridden base URL.
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

    /// Chat completion. Normalizes `choices[0].message.content`.
    pub async fn chat(&self, request: &GenerationRequest) -> Result<NormalizedResult, ProviderError> {
        let body = chat_body(&self.model, request);
        let value = self
            .transport
            .post_json(&format!("{}/chat/completions", self.base), &body)
            .await?;
        normalize_chat(value)
    }

    /// Streaming chat completion: yields content deltas in arrival order.
    /// The caller concatenates them into the final reply.
    pub fn stream_chat(
        &self,
        request: &GenerationRequest,
    ) -> impl Stream<Item = Result<String, ProviderError>> + Send {
        let mut body = chat_body(&self.model, request);
        body["stream"] = json!(true);
        let url = format!("{}/chat/completions", self.base);
        let transport = self.transport.clone();

        async_stream::try_stream! {
            let stream = transport.stream_sse(&url, &body);
            let mut stream = std::pin::pin!(stream);
            while let Some(chunk) = stream.next().await {
                if let Some(delta) = stream_delta(&chunk?) {
                    yield delta.to_owned();
                }
            }
        }
    }

    /// Image generation. Normalizes `data[0].url`.
    pub async fn image(&self, request: &GenerationRequest) -> Result<NormalizedResult, ProviderError> {
        let body = json!({
            "model": self.model,
            "prompt": request.prompt,
            "n": 1,
            "size": "1024x1024",
            "quality": "standard",
        });
        let value = self
            .transport
            .post_json(&format!("{}/images/generations", self.base), &body)
            .await?;
        normalize_image(value)
    }

    /// Text-to-speech. The success body is the raw audio.
    pub async fn speech(&self, request: &GenerationRequest) -> Result<NormalizedResult, ProviderError> {
        let body = json!({
            "model": self.model,
            "input": request.prompt,
            "voice": "nova",
            "speed": 1.0,
        });
        let (data, mime) = self
            .transport
            .post_bytes(&format!("{}/audio/speech", self.base), &body)
            .await?;
        Ok(NormalizedResult::Audio { data, mime })
    }
}

/// Build an OpenAI chat-completions body from a request: system prompt
/// per mode, the most recent history window, then the current user turn
/// with image attachments inlined as content parts.
pub fn chat_body(model: &str, request: &GenerationRequest) -> Value {
    let mut messages = vec![json!({
        "role": "system",
        "content": system_prompt(request.mode),
    })];

    for turn in recent_turns(&request.history, HISTORY_WINDOW) {
        messages.push(json!({
            "role": turn.role.as_str(),
            "content": turn.content,
        }));
    }

    if request.images.is_empty() {
        messages.push(json!({ "role": "user", "content": request.prompt }));
    } else {
        let mut content = vec![json!({ "type": "text", "text": request.prompt })];
        for image in &request.images {
            content.push(json!({
                "type": "image_url",
                "image_url": { "url": image },
            }));
        }
        messages.push(json!({ "role": "user", "content": content }));
    }

    let mut body = json!({
        "model": model,
        "messages": messages,
        "max_tokens": CHAT_MAX_TOKENS,
        "temperature": 0.7,
    });
    if request.mode == PromptMode::Reasoning {
        body["response_format"] = json!({ "type": "json_object" });
    }
    body
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<ChatMessage>,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

/// Extract `choices[0].message.content` or fail with a normalization
/// error. A missing or empty field is never an empty success.
pub fn normalize_chat(value: Value) -> Result<NormalizedResult, ProviderError> {
    let response: ChatResponse =
        serde_json::from_value(value).map_err(|e| ProviderError::Normalization(e.to_string()))?;
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .filter(|content| !content.is_empty())
        .map(NormalizedResult::Text)
        .ok_or_else(|| ProviderError::Normalization("no content in first choice".into()))
}

#[derive(Deserialize)]
struct ImageResponse {
    #[serde(default)]
    data: Vec<ImageItem>,
}

#[derive(Deserialize)]
struct ImageItem {
    url: Option<String>,
}

/// Extract `data[0].url` or fail with a normalization error.
pub fn normalize_image(value: Value) -> Result<NormalizedResult, ProviderError> {
    let response: ImageResponse =
        serde_json::from_value(value).map_err(|e| ProviderError::Normalization(e.to_string()))?;
    response
        .data
        .into_iter()
        .next()
        .and_then(|item| item.url)
        .filter(|url| !url.is_empty())
        .map(NormalizedResult::ImageRef)
        .ok_or_else(|| ProviderError::Normalization("no image url in response".into()))
}

/// The content delta of a streaming chunk, if any.
pub fn stream_delta(chunk: &Value) -> Option<&str> {
    chunk
        .get("choices")?
        .get(0)?
        .get("delta")?
        .get("content")?
        .as_str()
        .filter(|s| !s.is_empty())
}
