//! Shared HTTP transport for provider clients.
//!
//! `HttpTransport` wraps a `reqwest::Client` with pre-configured auth
//! headers (or a query-string key) and maps HTTP outcomes onto the
//! [`ProviderError`] taxonomy: network/timeout failures become
//! `Transport`, HTTP 429 becomes `RateLimit`, other non-2xx statuses
//! become `Status`. Provides `post_json`/`get_json` for JSON envelopes,
//! `post_bytes` for raw-audio responses, and `stream_sse` for
//! Server-Sent Events streaming.

use async_stream::try_stream;
use futures_core::Stream;
use futures_util::StreamExt;
use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use std::time::Duration;
use tcore::ProviderError;

/// Shared HTTP transport with pre-built authentication.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    headers: HeaderMap,
    query: Vec<(String, String)>,
    timeout: Option<Duration>,
}

fn base_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
    headers
}

impl HttpTransport {
    /// Create a transport with Bearer token authentication.
    pub fn bearer(client: Client, key: &str) -> Result<Self, ProviderError> {
        let mut headers = base_headers();
        headers.insert(
            header::AUTHORIZATION,
            format!("Bearer {key}")
                .parse()
                .map_err(|_| ProviderError::Configuration("invalid api key".into()))?,
        );
        Ok(Self {
            client,
            headers,
            query: Vec::new(),
            timeout: None,
        })
    }

    /// Create a transport with a custom header for authentication.
    ///
    /// Used by providers that don't use Bearer tokens (e.g. Hume uses
    /// `X-Hume-Api-Key`).
    pub fn header(client: Client, name: &str, value: &str) -> Result<Self, ProviderError> {
        let mut headers = base_headers();
        headers.insert(
            name.parse::<HeaderName>()
                .map_err(|_| ProviderError::Configuration("invalid auth header name".into()))?,
            value
                .parse::<HeaderValue>()
                .map_err(|_| ProviderError::Configuration("invalid api key".into()))?,
        );
        Ok(Self {
            client,
            headers,
            query: Vec::new(),
            timeout: None,
        })
    }

    /// Create a transport that authenticates via a query-string parameter
    /// (e.g. Gemini's `?key=`).
    pub fn query_key(client: Client, param: &str, key: &str) -> Self {
        Self {
            client,
            headers: base_headers(),
            query: vec![(param.to_owned(), key.to_owned())],
            timeout: None,
        }
    }

    /// Set a per-call timeout. Exceeding it is treated as a transport
    /// failure, which triggers fallback.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn request(&self, method: Method, url: &str) -> reqwest::RequestBuilder {
        let mut request = self
            .client
            .request(method, url)
            .headers(self.headers.clone())
            .query(&self.query);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }
        request
    }

    async fn execute(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, ProviderError> {
        let response = request
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;
        check_status(response).await
    }

    /// POST a JSON body and parse the response as JSON.
    pub async fn post_json(
        &self,
        url: &str,
        body: &impl Serialize,
    ) -> Result<serde_json::Value, ProviderError> {
        if let Ok(body) = serde_json::to_string(body) {
            tracing::trace!(%url, %body, "request");
        }
        let response = self.execute(self.request(Method::POST, url).json(body)).await?;
        let text = response
            .text()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;
        serde_json::from_str(&text).map_err(|e| ProviderError::Normalization(e.to_string()))
    }

    /// POST a JSON body and return the raw response bytes with their MIME
    /// type. Used by TTS endpoints whose success body is the audio itself.
    pub async fn post_bytes(
        &self,
        url: &str,
        body: &impl Serialize,
    ) -> Result<(Vec<u8>, String), ProviderError> {
        let response = self.execute(self.request(Method::POST, url).json(body)).await?;
        let mime = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.split(';').next().unwrap_or(v).trim().to_owned())
            .unwrap_or_else(|| "audio/mpeg".to_owned());
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;
        Ok((bytes.to_vec(), mime))
    }

    /// GET with extra query pairs and parse the response as JSON.
    pub async fn get_json(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<serde_json::Value, ProviderError> {
        let response = self
            .execute(self.request(Method::GET, url).query(query))
            .await?;
        let text = response
            .text()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;
        serde_json::from_str(&text).map_err(|e| ProviderError::Normalization(e.to_string()))
    }

    /// Stream an SSE response (OpenAI-compatible format).
    ///
    /// Parses `data: ` prefixed lines, skips the `[DONE]` sentinel, and
    /// yields each chunk as a JSON value. Unparseable chunks are logged
    /// and skipped.
    pub fn stream_sse(
        &self,
        url: &str,
        body: &impl Serialize,
    ) -> impl Stream<Item = Result<serde_json::Value, ProviderError>> + Send {
        let request = self.request(Method::POST, url).json(body);

        try_stream! {
            let response = request
                .send()
                .await
                .map_err(|e| ProviderError::Transport(e.to_string()))?;
            let response = check_status(response).await?;
            let mut stream = response.bytes_stream();
            let mut buffer = SseBuffer::default();
            while let Some(next) = stream.next().await {
                let bytes = next.map_err(|e| ProviderError::Transport(e.to_string()))?;
                let text = String::from_utf8_lossy(&bytes);
                tracing::trace!(chunk = %text);
                for data in buffer.push(&text) {
                    match serde_json::from_str(&data) {
                        Ok(value) => yield value,
                        Err(e) => tracing::warn!("failed to parse chunk: {e}, data: {data}"),
                    }
                }
            }
        }
    }

    /// Get a reference to the headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Get the query-string auth pairs.
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }
}

/// Accumulates SSE text across network chunks and yields the payload of
/// each complete `data:` line, skipping the `[DONE]` sentinel.
///
/// Network chunk boundaries do not align with event boundaries; a line
/// split across two chunks is held back until its newline arrives.
#[derive(Debug, Default)]
pub struct SseBuffer {
    pending: String,
}

impl SseBuffer {
    /// Feed a chunk and return the data payloads of every line it
    /// completed.
    pub fn push(&mut self, chunk: &str) -> Vec<String> {
        self.pending.push_str(chunk);
        let mut payloads = Vec::new();
        while let Some(pos) = self.pending.find('\n') {
            let line: String = self.pending.drain(..=pos).collect();
            if let Some(data) = sse_data_line(line.trim_end()) {
                payloads.push(data.to_owned());
            }
        }
        payloads
    }
}

/// The payload of a single `data:` line, unless it is the `[DONE]`
/// sentinel or empty.
fn sse_data_line(line: &str) -> Option<&str> {
    let data = line.strip_prefix("data:")?.trim();
    (!data.is_empty() && data != "[DONE]").then_some(data)
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ProviderError> {
    let status = response.status();
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(ProviderError::RateLimit);
    }
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ProviderError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response)
}
