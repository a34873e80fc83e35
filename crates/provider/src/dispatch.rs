//! Priority-ordered provider dispatch with fallback.
//!
//! Each capability has an ordered chain of provider entries. A request
//! walks the chain: every eligible entry is tried in order (with
//! rate-limit backoff per entry) and the first success wins. Chat
//! requests that exhaust the chain fall back to a deterministic offline
//! reply so the caller always gets text; other capabilities surface the
//! full attempt trail.

use crate::config::DispatchConfig;
use crate::provider::{Provider, build_provider};
use crate::retry::BackoffPolicy;
use compact_str::CompactString;
use reqwest::Client;
use tcore::{
    AttemptFailure, Capability, DispatchError, Generate, GenerationRequest, NormalizedResult,
    offline_reply,
};

/// One provider in a capability chain, in priority order.
#[derive(Debug, Clone)]
pub struct ProviderEntry<P> {
    /// Configured entry name, carried into logs and attempt failures.
    pub name: CompactString,
    /// Capability this entry serves.
    pub capability: Capability,
    /// Whether the backend accepts image attachments.
    pub multimodal: bool,
    /// The backend itself.
    pub provider: P,
}

/// Walks capability chains and normalizes the outcome.
#[derive(Debug, Clone)]
pub struct Dispatcher<P> {
    entries: Vec<ProviderEntry<P>>,
    backoff: BackoffPolicy,
}

impl<P: Generate> Dispatcher<P> {
    pub fn new(entries: Vec<ProviderEntry<P>>) -> Self {
        Self {
            entries,
            backoff: BackoffPolicy::default(),
        }
    }

    pub fn with_backoff(mut self, backoff: BackoffPolicy) -> Self {
        self.backoff = backoff;
        self
    }

    /// Entries serving a capability, in priority order.
    pub fn chain(&self, capability: Capability) -> impl Iterator<Item = &ProviderEntry<P>> {
        self.entries.iter().filter(move |e| e.capability == capability)
    }

    /// Dispatch a request down the capability's chain.
    ///
    /// Entries are skipped without counting as attempts when the request
    /// pins a different provider by name, or when it carries images and
    /// the entry cannot take them. Each attempted entry runs under the
    /// rate-limit backoff policy; the first success short-circuits the
    /// rest of the chain.
    pub async fn dispatch(
        &self,
        capability: Capability,
        request: &GenerationRequest,
    ) -> Result<NormalizedResult, DispatchError> {
        if request.prompt.trim().is_empty() {
            return Err(DispatchError::InvalidRequest("empty prompt".into()));
        }
        if request.capability != capability {
            return Err(DispatchError::InvalidRequest(format!(
                "request built for {} dispatched as {capability}",
                request.capability
            )));
        }

        let mut eligible = 0usize;
        let mut attempts = Vec::new();
        for entry in self.chain(capability) {
            if let Some(pinned) = &request.provider
                && pinned != &entry.name
            {
                tracing::debug!(provider = %entry.name, %pinned, "skipping non-pinned provider");
                continue;
            }
            if request.multimodal() && !entry.multimodal {
                tracing::debug!(provider = %entry.name, "skipping text-only provider for image request");
                continue;
            }
            eligible += 1;

            match self.backoff.run(|| entry.provider.send(request)).await {
                Ok(result) => {
                    tracing::info!(provider = %entry.name, %capability, "request served");
                    return Ok(result);
                }
                Err(error) => {
                    tracing::warn!(provider = %entry.name, %error, "provider failed, falling back");
                    attempts.push(AttemptFailure {
                        provider: entry.name.clone(),
                        error,
                    });
                }
            }
        }

        // Chat degrades to an offline placeholder rather than an error,
        // even when no provider is configured at all.
        if capability == Capability::Chat {
            tracing::warn!("chat chain exhausted, serving offline reply");
            return Ok(NormalizedResult::Text(offline_reply(&request.prompt)));
        }
        if eligible == 0 {
            return Err(DispatchError::NoEligibleProvider(capability));
        }
        Err(DispatchError::Exhausted {
            capability,
            attempts,
        })
    }
}

impl Dispatcher<Provider> {
    /// Build a dispatcher from validated configuration, instantiating one
    /// backend per chain entry. Entries without a credential are skipped
    /// rather than failing startup.
    pub fn from_config(config: &DispatchConfig, client: Client) -> Result<Self, DispatchError> {
        config.validate()?;
        let mut entries = Vec::new();
        for capability in Capability::ALL {
            for name in config.chains.for_capability(capability) {
                // validate() guarantees the name resolves.
                let Some(provider_config) = config.provider(name) else {
                    continue;
                };
                if !provider_config.configured() {
                    tracing::debug!(provider = %name, %capability, "no api key, leaving out of chain");
                    continue;
                }
                let provider = build_provider(provider_config, client.clone())?;
                entries.push(ProviderEntry {
                    name: name.clone(),
                    capability,
                    multimodal: provider.supports_images(),
                    provider,
                });
            }
        }
        Ok(Self::new(entries))
    }
}
