//! The seam between the dispatcher and concrete provider clients.

use crate::{GenerationRequest, NormalizedResult, ProviderError};
use std::future::Future;

/// A provider that can serve a generation request.
///
/// Implementations perform the network call and normalize the response;
/// they must not retry internally. All retry/backoff and fallback policy
/// lives in the dispatcher.
pub trait Generate: Clone + Send + Sync {
    /// Issue the request and normalize the response.
    fn send(
        &self,
        request: &GenerationRequest,
    ) -> impl Future<Output = Result<NormalizedResult, ProviderError>> + Send;
}
