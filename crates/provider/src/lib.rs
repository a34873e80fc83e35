//! Provider backends, fallback dispatch, and video-task tracking.
//!
//! The entry points are [`DispatchConfig::load`] to read the provider
//! table and capability chains, [`Dispatcher::from_config`] to build the
//! chains, and [`Dispatcher::dispatch`] to serve a request. Video jobs
//! returned as [`tcore::NormalizedResult::TaskHandle`] are followed up
//! through a [`TaskTracker`].

mod config;
mod dispatch;
mod gemini;
mod http;
mod hume;
mod manus;
mod minimax;
mod openai;
mod provider;
mod retry;
mod task;

pub use config::{BackendConfig, Chains, DispatchConfig, MiniMaxConfig, ProviderConfig, RemoteConfig};
pub use dispatch::{Dispatcher, ProviderEntry};
pub use gemini::Gemini;
pub use http::{HttpTransport, SseBuffer};
pub use hume::Hume;
pub use manus::Manus;
pub use minimax::MiniMax;
pub use openai::OpenAi;
pub use provider::{Provider, build_provider};
pub use retry::BackoffPolicy;
pub use task::{JobReport, StatusPhase, TaskTracker, VideoBackend, classify_status};

// Normalizers are exported for direct reuse and for exercising the
// response formats without a live endpoint.
pub use gemini::{generate_body, normalize_candidates, split_data_uri};
pub use minimax::{normalize_speech, parse_asset_url, parse_status, parse_submission};
pub use openai::{chat_body, normalize_chat, normalize_image, stream_delta};
