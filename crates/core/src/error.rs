//! Error taxonomy for provider calls and dispatch.

use crate::Capability;
use compact_str::CompactString;
use thiserror::Error;

/// A failure from a single provider call.
///
/// The dispatcher switches on the variant: `RateLimit` is eligible for
/// bounded backoff-retry, everything else falls through to the next
/// provider in the chain immediately.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// Missing or unusable credential / endpoint configuration.
    #[error("provider not configured: {0}")]
    Configuration(String),

    /// Network failure or per-call timeout.
    #[error("transport failure: {0}")]
    Transport(String),

    /// HTTP 429 from the provider.
    #[error("rate limited (HTTP 429)")]
    RateLimit,

    /// Non-2xx status other than 429.
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    /// 2xx response whose body lacks the expected canonical field.
    ///
    /// Never surfaced as an empty success; the dispatcher treats it like a
    /// transport failure and falls back.
    #[error("malformed response: {0}")]
    Normalization(String),
}

impl ProviderError {
    /// Whether the error is eligible for backoff-retry.
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, Self::RateLimit)
    }
}

/// One failed attempt within a fallback chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptFailure {
    /// Name of the provider entry that was attempted.
    pub provider: CompactString,
    /// Why the attempt failed.
    pub error: ProviderError,
}

/// A dispatch-level failure, after the chain has been consulted.
///
/// Chat requests never produce `Exhausted`; they degrade to an offline
/// placeholder instead. Generative-media capabilities surface the full
/// list of attempted providers.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The request failed its payload constraint before any provider was
    /// consulted.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The dispatcher could not be built from its configuration.
    #[error("invalid configuration: {0}")]
    Configuration(#[from] ProviderError),

    /// No provider in the chain was configured for this capability.
    #[error("no eligible provider configured for {0}")]
    NoEligibleProvider(Capability),

    /// Every eligible provider failed.
    #[error("all {} provider(s) exhausted for {capability}", .attempts.len())]
    Exhausted {
        capability: Capability,
        attempts: Vec<AttemptFailure>,
    },
}

/// A failure while polling an asynchronous generation job.
///
/// Distinguishes the status query failing from the secondary asset-URL
/// lookup failing after the job already succeeded; the latter is retryable
/// without treating the job itself as failed.
#[derive(Debug, Error)]
pub enum PollError {
    /// The status endpoint could not be queried or returned an unusable
    /// report.
    #[error("status query failed: {0}")]
    StatusQuery(#[source] ProviderError),

    /// The job succeeded but the artifact URL could not be resolved.
    #[error("asset lookup failed for completed task: {0}")]
    AssetLookup(#[source] ProviderError),
}
