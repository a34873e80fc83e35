//! MiniMax client: TTS with hex-encoded audio, and asynchronous video
//! generation (job submission, status polling, asset-URL lookup).

use crate::http::HttpTransport;
use crate::task::{JobReport, VideoBackend};
use compact_str::CompactString;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use tcore::{GenerationRequest, NormalizedResult, ProviderError, TaskId};

/// Default MiniMax global API base.
pub const DEFAULT_BASE: &str = "https://api.minimax.io/v1";

/// MiniMax provider client.
#[derive(Debug, Clone)]
pub struct MiniMax {
    transport: HttpTransport,
    base: String,
    group_id: CompactString,
    model: CompactString,
}

impl MiniMax {
    pub fn new(
        client: Client,
        key: &str,
        group_id: impl Into<CompactString>,
        model: impl Into<CompactString>,
        base_url: Option<&str>,
    ) -> Result<Self, ProviderError> {
        Ok(Self {
            transport: HttpTransport::bearer(client, key)?,
            base: base_url.unwrap_or(DEFAULT_BASE).trim_end_matches('/').to_owned(),
            group_id: group_id.into(),
            model: model.into(),
        })
    }

    /// Text-to-speech. The success envelope carries hex-encoded audio in
    /// `data.audio`.
    pub async fn speech(&self, request: &GenerationRequest) -> Result<NormalizedResult, ProviderError> {
        let body = json!({
            "model": self.model,
            "text": request.prompt,
            "voice_setting": {
                "voice_id": "male-qn-qingse",
                "speed": 0.88,
                "vol": 1.0,
                "pitch": -0.5,
            },
            "audio_setting": {
                "sample_rate": 32000,
                "bitrate": 128000,
                "format": "mp3",
                "channel": 1,
            },
        });
        let value = self
            .transport
            .post_json(&format!("{}/t2a_v2", self.base), &body)
            .await?;
        normalize_speech(value)
    }

    /// The account group id this client is scoped to.
    pub fn group_id(&self) -> &str {
        &self.group_id
    }
}

impl VideoBackend for MiniMax {
    async fn submit(&self, prompt: &str) -> Result<TaskId, ProviderError> {
        let body = json!({
            "model": self.model,
            "prompt": prompt,
            "prompt_optimizer": true,
        });
        let value = self
            .transport
            .post_json(&format!("{}/video_generation", self.base), &body)
            .await?;
        parse_submission(value)
    }

    async fn status(&self, task: &TaskId) -> Result<JobReport, ProviderError> {
        let value = self
            .transport
            .get_json(
                &format!("{}/video_generation", self.base),
                &[("task_id", task.as_str())],
            )
            .await?;
        parse_status(value)
    }

    async fn asset_url(&self, file_id: &str) -> Result<String, ProviderError> {
        let value = self
            .transport
            .get_json(
                &format!("{}/files/retrieve", self.base),
                &[("file_id", file_id), ("GroupId", &self.group_id)],
            )
            .await?;
        parse_asset_url(value)
    }
}

#[derive(Deserialize)]
struct SpeechResponse {
    data: Option<SpeechData>,
}

#[derive(Deserialize)]
struct SpeechData {
    audio: Option<String>,
}

/// Decode the `data.audio` hex payload into audio bytes.
pub fn normalize_speech(value: Value) -> Result<NormalizedResult, ProviderError> {
    let response: SpeechResponse =
        serde_json::from_value(value).map_err(|e| ProviderError::Normalization(e.to_string()))?;
    let audio_hex = response
        .data
        .and_then(|data| data.audio)
        .filter(|audio| !audio.is_empty())
        .ok_or_else(|| ProviderError::Normalization("no audio in response".into()))?;
    let data = hex::decode(&audio_hex)
        .map_err(|e| ProviderError::Normalization(format!("bad audio hex: {e}")))?;
    Ok(NormalizedResult::Audio {
        data,
        mime: "audio/mpeg".into(),
    })
}

/// Extract the task id from a job-submission response.
pub fn parse_submission(value: Value) -> Result<TaskId, ProviderError> {
    value
        .get("task_id")
        .and_then(|id| id.as_str())
        .filter(|id| !id.is_empty())
        .map(TaskId::new)
        .ok_or_else(|| ProviderError::Normalization("no task_id in response".into()))
}

#[derive(Deserialize)]
struct StatusResponse {
    status: Option<String>,
    file_id: Option<String>,
    error_message: Option<String>,
}

/// Extract the raw status report from a status-query response.
pub fn parse_status(value: Value) -> Result<JobReport, ProviderError> {
    let response: StatusResponse =
        serde_json::from_value(value).map_err(|e| ProviderError::Normalization(e.to_string()))?;
    let status = response
        .status
        .filter(|status| !status.is_empty())
        .ok_or_else(|| ProviderError::Normalization("no status in response".into()))?;
    Ok(JobReport {
        status,
        file_id: response.file_id,
        error: response.error_message,
    })
}

/// Extract `file.download_url` from an asset-lookup response. An absent
/// or empty URL is a normalization failure, never an empty artifact.
pub fn parse_asset_url(value: Value) -> Result<String, ProviderError> {
    value
        .get("file")
        .and_then(|file| file.get("download_url"))
        .and_then(|url| url.as_str())
        .filter(|url| !url.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| ProviderError::Normalization("no download_url in response".into()))
}
