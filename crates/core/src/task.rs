//! Task identity and status for asynchronous generation jobs.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Opaque identifier for a submitted generation job.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TaskId(CompactString);

impl TaskId {
    pub fn new(id: impl Into<CompactString>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Status of an asynchronous generation job.
///
/// `Succeeded` and `Failed` come from the provider; `TimedOut` is imposed
/// by the polling caller when its wall-clock ceiling elapses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskStatus {
    /// Submitted, not yet picked up.
    Pending,
    /// The provider is working on the job.
    Processing,
    /// Terminal: the artifact is ready.
    Succeeded {
        /// Downloadable artifact reference.
        artifact: String,
    },
    /// Terminal: the provider reported the job failed.
    Failed {
        /// Provider-supplied failure reason.
        reason: String,
    },
    /// Terminal: the caller's wait ceiling elapsed first.
    TimedOut,
}

impl TaskStatus {
    /// Whether the status is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Succeeded { .. } | Self::Failed { .. } | Self::TimedOut
        )
    }
}
