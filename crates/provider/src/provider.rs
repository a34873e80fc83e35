//! Concrete provider backends behind one dispatchable enum.

use crate::config::{BackendConfig, ProviderConfig};
use crate::gemini::Gemini;
use crate::hume::Hume;
use crate::manus::Manus;
use crate::minimax::MiniMax;
use crate::openai::OpenAi;
use crate::task::VideoBackend;
use reqwest::Client;
use tcore::{Capability, Generate, GenerationRequest, NormalizedResult, ProviderError};

/// A configured provider backend.
#[derive(Debug, Clone)]
pub enum Provider {
    OpenAi(OpenAi),
    Gemini(Gemini),
    MiniMax(MiniMax),
    Manus(Manus),
    Hume(Hume),
}

/// Build a provider backend from its configuration.
///
/// Entries without a credential are rejected here; the dispatcher skips
/// them before ever calling this.
pub fn build_provider(config: &ProviderConfig, client: Client) -> Result<Provider, ProviderError> {
    if !config.configured() {
        return Err(ProviderError::Configuration(format!(
            "provider '{}' has no api key",
            config.name
        )));
    }
    let key = config.api_key();
    let base = config.base_url();
    Ok(match &config.backend {
        BackendConfig::OpenAi(_) => {
            Provider::OpenAi(OpenAi::new(client, key, config.model.clone(), base)?)
        }
        BackendConfig::Gemini(_) => {
            Provider::Gemini(Gemini::new(client, key, config.model.clone(), base))
        }
        BackendConfig::MiniMax(minimax) => Provider::MiniMax(MiniMax::new(
            client,
            key,
            minimax.group_id.as_str(),
            config.model.clone(),
            base,
        )?),
        BackendConfig::Manus(_) => {
            Provider::Manus(Manus::new(client, key, config.model.clone(), base)?)
        }
        BackendConfig::Hume(_) => Provider::Hume(Hume::new(client, key, base)?),
    })
}

impl Provider {
    /// Human-readable provider kind string for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Provider::OpenAi(_) => "openai",
            Provider::Gemini(_) => "gemini",
            Provider::MiniMax(_) => "minimax",
            Provider::Manus(_) => "manus",
            Provider::Hume(_) => "hume",
        }
    }

    /// Whether this backend accepts image attachments on chat requests.
    pub fn supports_images(&self) -> bool {
        matches!(self, Provider::OpenAi(_) | Provider::Gemini(_))
    }
}

impl Generate for Provider {
    async fn send(&self, request: &GenerationRequest) -> Result<NormalizedResult, ProviderError> {
        match (self, request.capability) {
            (Provider::OpenAi(openai), Capability::Chat) => openai.chat(request).await,
            (Provider::OpenAi(openai), Capability::Image) => openai.image(request).await,
            (Provider::OpenAi(openai), Capability::Speech) => openai.speech(request).await,
            (Provider::Gemini(gemini), Capability::Chat) => gemini.chat(request).await,
            (Provider::MiniMax(minimax), Capability::Speech) => minimax.speech(request).await,
            (Provider::MiniMax(minimax), Capability::Video) => {
                let task = minimax.submit(&request.prompt).await?;
                Ok(NormalizedResult::TaskHandle(task))
            }
            (Provider::Manus(manus), Capability::Chat) => manus.chat(request).await,
            (Provider::Manus(manus), Capability::Image) => manus.image(request).await,
            (Provider::Hume(hume), Capability::Speech) => hume.speech(request).await,
            (provider, capability) => Err(ProviderError::Configuration(format!(
                "{} does not serve {capability}",
                provider.kind()
            ))),
        }
    }
}
