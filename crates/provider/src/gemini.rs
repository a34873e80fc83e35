//! Gemini client: chat via `generateContent`.
//!
//! The API key travels as a `?key=` query parameter rather than a
//! header. History folds into the `contents` array with `user`/`model`
//! roles; image attachments become `inline_data` parts with the data-URI
//! prefix stripped.

use crate::http::HttpTransport;
use compact_str::CompactString;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use tcore::{
    GenerationRequest, HISTORY_WINDOW, NormalizedResult, PromptMode, ProviderError, Role,
    recent_turns, system_prompt,
};

/// Default Gemini API base.
pub const DEFAULT_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini provider client.
#[derive(Debug, Clone)]
pub struct Gemini {
    transport: HttpTransport,
    base: String,
    model: CompactString,
}

impl Gemini {
    pub fn new(
        client: Client,
        key: &str,
        model: impl Into<CompactString>,
        base_url: Option<&str>,
    ) -> Self {
        Self {
            transport: HttpTransport::query_key(client, "key", key),
            base: base_url.unwrap_or(DEFAULT_BASE).trim_end_matches('/').to_owned(),
            model: model.into(),
        }
    }

    /// Chat completion. Normalizes `candidates[0].content.parts[0].text`.
    pub async fn chat(&self, request: &GenerationRequest) -> Result<NormalizedResult, ProviderError> {
        let body = generate_body(request);
        let url = format!("{}/models/{}:generateContent", self.base, self.model);
        let value = self.transport.post_json(&url, &body).await?;
        normalize_candidates(value)
    }
}

/// Build a `generateContent` body: system instruction, history folded
/// into `contents`, and the current turn with `inline_data` image parts.
pub fn generate_body(request: &GenerationRequest) -> Value {
    let mut contents = Vec::new();

    for turn in recent_turns(&request.history, HISTORY_WINDOW) {
        let role = match turn.role {
            Role::User => "user",
            Role::Assistant => "model",
        };
        contents.push(json!({
            "role": role,
            "parts": [{ "text": turn.content }],
        }));
    }

    let mut parts = Vec::new();
    for image in &request.images {
        let (mime, data) = split_data_uri(image);
        parts.push(json!({
            "inline_data": { "mime_type": mime, "data": data },
        }));
    }
    parts.push(json!({ "text": request.prompt }));
    contents.push(json!({ "role": "user", "parts": parts }));

    let mut generation_config = json!({
        "temperature": 0.7,
        "maxOutputTokens": 8192,
    });
    if request.mode == PromptMode::Reasoning {
        generation_config["responseMimeType"] = json!("application/json");
    }

    json!({
        "systemInstruction": { "parts": [{ "text": system_prompt(request.mode) }] },
        "contents": contents,
        "generationConfig": generation_config,
    })
}

/// Split a data-URI into MIME type and base64 payload.
///
/// Bare base64 strings pass through with an assumed `image/jpeg` type.
pub fn split_data_uri(image: &str) -> (&str, &str) {
    if let Some(rest) = image.strip_prefix("data:")
        && let Some((meta, data)) = rest.split_once(',')
    {
        let mime = meta.split(';').next().unwrap_or("");
        if !mime.is_empty() {
            return (mime, data);
        }
        return ("image/jpeg", data);
    }
    ("image/jpeg", image)
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    text: Option<String>,
}

/// Extract `candidates[0].content.parts[0].text` or fail with a
/// normalization error.
pub fn normalize_candidates(value: Value) -> Result<NormalizedResult, ProviderError> {
    let response: GenerateResponse =
        serde_json::from_value(value).map_err(|e| ProviderError::Normalization(e.to_string()))?;
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().next())
        .and_then(|part| part.text)
        .filter(|text| !text.is_empty())
        .map(NormalizedResult::Text)
        .ok_or_else(|| ProviderError::Normalization("no text in first candidate".into()))
}
