//! Scripted provider for testing.
//!
//! Implements [`Generate`] with pre-seeded outcomes so dispatcher and
//! retry behavior can be exercised without network I/O.

use crate::{Generate, GenerationRequest, NormalizedResult, ProviderError};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// A fake provider that replays scripted outcomes in order.
///
/// Once the script is exhausted it returns the configured repeating
/// outcome, or a transport error if none was set. Counts every call.
#[derive(Clone, Default)]
pub struct ScriptedProvider {
    script: Arc<Mutex<VecDeque<Result<NormalizedResult, ProviderError>>>>,
    repeat: Arc<Mutex<Option<Result<NormalizedResult, ProviderError>>>>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedProvider {
    /// Replay `outcomes` in order, then fail with a transport error.
    pub fn new(outcomes: Vec<Result<NormalizedResult, ProviderError>>) -> Self {
        Self {
            script: Arc::new(Mutex::new(outcomes.into())),
            ..Self::default()
        }
    }

    /// Return the same outcome on every call.
    pub fn always(outcome: Result<NormalizedResult, ProviderError>) -> Self {
        Self {
            repeat: Arc::new(Mutex::new(Some(outcome))),
            ..Self::default()
        }
    }

    /// Succeed with the same text on every call.
    pub fn text(reply: impl Into<String>) -> Self {
        Self::always(Ok(NormalizedResult::Text(reply.into())))
    }

    /// Fail with the same error on every call.
    pub fn failing(error: ProviderError) -> Self {
        Self::always(Err(error))
    }

    /// How many times `send` has been called.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl Generate for ScriptedProvider {
    async fn send(
        &self,
        _request: &GenerationRequest,
    ) -> Result<NormalizedResult, ProviderError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        if let Some(next) = self.script.lock().expect("script lock poisoned").pop_front() {
            return next;
        }
        if let Some(outcome) = self.repeat.lock().expect("script lock poisoned").clone() {
            return outcome;
        }
        Err(ProviderError::Transport("script exhausted".into()))
    }
}
