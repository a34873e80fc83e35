//! Provider and fallback-chain configuration loaded from TOML.
//!
//! Uses `#[serde(tag = "provider", flatten)]` so all fields appear at the
//! same level in TOML. Configuration is read once at startup and never
//! mutated; the priority order of each capability chain is explicit
//! configuration, never computed.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use tcore::{Capability, ProviderError};

/// Named provider configuration. Combines identity (`name`) and model
/// with the provider-specific backend settings.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    /// Unique name for this provider entry, referenced by the chains.
    pub name: CompactString,
    /// Model identifier sent in request bodies.
    pub model: CompactString,
    /// Provider-specific settings, discriminated by the `provider` field.
    #[serde(flatten)]
    pub backend: BackendConfig,
}

impl ProviderConfig {
    /// Human-readable provider kind string for logging.
    pub fn kind(&self) -> &'static str {
        match &self.backend {
            BackendConfig::OpenAi(_) => "openai",
            BackendConfig::Gemini(_) => "gemini",
            BackendConfig::MiniMax(_) => "minimax",
            BackendConfig::Manus(_) => "manus",
            BackendConfig::Hume(_) => "hume",
        }
    }

    /// Whether a credential is present. Entries without one are skipped
    /// by the dispatcher (never attempted).
    pub fn configured(&self) -> bool {
        !self.api_key().trim().is_empty()
    }

    pub fn api_key(&self) -> &str {
        match &self.backend {
            BackendConfig::OpenAi(remote)
            | BackendConfig::Gemini(remote)
            | BackendConfig::Manus(remote)
            | BackendConfig::Hume(remote) => &remote.api_key,
            BackendConfig::MiniMax(minimax) => &minimax.api_key,
        }
    }

    /// Optional base URL override for the provider endpoint.
    pub fn base_url(&self) -> Option<&str> {
        match &self.backend {
            BackendConfig::OpenAi(remote)
            | BackendConfig::Gemini(remote)
            | BackendConfig::Manus(remote)
            | BackendConfig::Hume(remote) => remote.base_url.as_deref(),
            BackendConfig::MiniMax(minimax) => minimax.base_url.as_deref(),
        }
    }
}

/// Provider-specific configuration, discriminated by the `provider`
/// field in TOML.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(tag = "provider", rename_all = "snake_case")]
pub enum BackendConfig {
    /// OpenAI API: chat, image generation and TTS.
    #[serde(rename = "openai")]
    OpenAi(RemoteConfig),
    /// Google Gemini API (key passed as a query parameter).
    Gemini(RemoteConfig),
    /// MiniMax API: TTS (hex-encoded audio) and async video generation.
    #[serde(rename = "minimax")]
    MiniMax(MiniMaxConfig),
    /// Manus API: OpenAI-compatible chat and image generation.
    Manus(RemoteConfig),
    /// Hume API: TTS with raw-audio responses.
    Hume(RemoteConfig),
}

/// Configuration for remote HTTP API providers.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct RemoteConfig {
    /// API key.
    #[serde(default)]
    pub api_key: String,
    /// Optional base URL override for the provider endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// Configuration for MiniMax, which additionally scopes calls to a group.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct MiniMaxConfig {
    /// API key.
    #[serde(default)]
    pub api_key: String,
    /// Account group id, required by some endpoints.
    #[serde(default)]
    pub group_id: String,
    /// Optional base URL override for the provider endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// Ordered fallback chains per capability, referencing provider entries
/// by name. First name is attempted first.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Chains {
    #[serde(default)]
    pub chat: Vec<CompactString>,
    #[serde(default)]
    pub image: Vec<CompactString>,
    #[serde(default)]
    pub speech: Vec<CompactString>,
    #[serde(default)]
    pub video: Vec<CompactString>,
}

impl Chains {
    /// The ordered chain for a capability.
    pub fn for_capability(&self, capability: Capability) -> &[CompactString] {
        match capability {
            Capability::Chat => &self.chat,
            Capability::Image => &self.image,
            Capability::Speech => &self.speech,
            Capability::Video => &self.video,
        }
    }
}

/// Top-level dispatch configuration: the provider table plus the
/// per-capability fallback chains.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DispatchConfig {
    #[serde(default)]
    pub providers: Vec<ProviderConfig>,
    #[serde(default)]
    pub chains: Chains,
}

impl DispatchConfig {
    /// Load and validate configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ProviderError> {
        let text = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ProviderError::Configuration(e.to_string()))?;
        let config: Self =
            toml::from_str(&text).map_err(|e| ProviderError::Configuration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate internal consistency: unique entry names, and every chain
    /// name resolving to a defined provider entry.
    pub fn validate(&self) -> Result<(), ProviderError> {
        let mut names = BTreeSet::new();
        for provider in &self.providers {
            if !names.insert(provider.name.as_str()) {
                return Err(ProviderError::Configuration(format!(
                    "duplicate provider entry '{}'",
                    provider.name
                )));
            }
        }
        for capability in Capability::ALL {
            for name in self.chains.for_capability(capability) {
                if !names.contains(name.as_str()) {
                    return Err(ProviderError::Configuration(format!(
                        "{capability} chain references unknown provider '{name}'"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Look up a provider entry by name.
    pub fn provider(&self, name: &str) -> Option<&ProviderConfig> {
        self.providers.iter().find(|p| p.name == name)
    }
}
