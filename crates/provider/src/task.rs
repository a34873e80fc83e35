//! Asynchronous video-task tracking.
//!
//! Video generation is submit-then-poll: a backend accepts a prompt and
//! returns an opaque task id, the tracker polls for status and resolves
//! the artifact URL once the job succeeds. Terminal outcomes are cached
//! so a settled task never flips back to an in-flight state.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tcore::{PollError, ProviderError, TaskId, TaskStatus};
use tokio::time::sleep;

/// Backend for submit-then-poll video generation.
pub trait VideoBackend: Clone + Send + Sync {
    /// Submit a generation job, returning its task id.
    fn submit(&self, prompt: &str) -> impl Future<Output = Result<TaskId, ProviderError>> + Send;

    /// Query the raw status of a task.
    fn status(&self, task: &TaskId) -> impl Future<Output = Result<JobReport, ProviderError>> + Send;

    /// Resolve the downloadable artifact URL for a finished job's file.
    fn asset_url(&self, file_id: &str) -> impl Future<Output = Result<String, ProviderError>> + Send;
}

/// Raw status report as the backend words it.
#[derive(Debug, Clone)]
pub struct JobReport {
    /// Backend status string, classified by [`classify_status`].
    pub status: String,
    /// File id of the finished artifact, present once the job succeeds.
    pub file_id: Option<String>,
    /// Backend failure description, if any.
    pub error: Option<String>,
}

/// Phase of a classified status string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusPhase {
    Pending,
    Processing,
    Succeeded,
    Failed,
}

/// Map a backend status string onto a phase, case-insensitively.
/// Unrecognized strings return `None` and are surfaced as errors rather
/// than guessed at.
pub fn classify_status(status: &str) -> Option<StatusPhase> {
    match status.to_ascii_lowercase().as_str() {
        "queueing" | "queued" | "submitted" | "pending" => Some(StatusPhase::Pending),
        "preparing" | "processing" | "running" => Some(StatusPhase::Processing),
        "success" | "succeeded" => Some(StatusPhase::Succeeded),
        "fail" | "failed" | "error" => Some(StatusPhase::Failed),
        _ => None,
    }
}

/// Tracks submitted video tasks and their last known status.
#[derive(Clone)]
pub struct TaskTracker<B> {
    backend: B,
    seen: Arc<Mutex<BTreeMap<TaskId, TaskStatus>>>,
}

impl<B: VideoBackend> TaskTracker<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            seen: Arc::new(Mutex::new(BTreeMap::new())),
        }
    }

    /// Submit a generation job and start tracking it as pending.
    pub async fn submit(&self, prompt: &str) -> Result<TaskId, ProviderError> {
        let task = self.backend.submit(prompt).await?;
        tracing::info!(task = %task, "video task submitted");
        self.seen
            .lock()
            .expect("task status lock poisoned")
            .insert(task.clone(), TaskStatus::Pending);
        Ok(task)
    }

    /// Poll a task once. Settled tasks answer from the cache without
    /// touching the backend; in-flight tasks query it and cache the
    /// classified result. A succeeded job without a resolvable artifact
    /// URL stays uncached so the lookup can be retried.
    pub async fn poll(&self, task: &TaskId) -> Result<TaskStatus, PollError> {
        {
            let seen = self.seen.lock().expect("task status lock poisoned");
            if let Some(status @ (TaskStatus::Succeeded { .. } | TaskStatus::Failed { .. })) =
                seen.get(task)
            {
                return Ok(status.clone());
            }
        }

        let report = self
            .backend
            .status(task)
            .await
            .map_err(PollError::StatusQuery)?;
        let phase = classify_status(&report.status).ok_or_else(|| {
            PollError::StatusQuery(ProviderError::Normalization(format!(
                "unknown task status '{}'",
                report.status
            )))
        })?;

        let status = match phase {
            StatusPhase::Pending => TaskStatus::Pending,
            StatusPhase::Processing => TaskStatus::Processing,
            StatusPhase::Failed => TaskStatus::Failed {
                reason: report.error.unwrap_or_else(|| "generation failed".into()),
            },
            StatusPhase::Succeeded => {
                let file_id = report.file_id.filter(|id| !id.is_empty()).ok_or_else(|| {
                    PollError::StatusQuery(ProviderError::Normalization(
                        "succeeded without file id".into(),
                    ))
                })?;
                let artifact = self
                    .backend
                    .asset_url(&file_id)
                    .await
                    .map_err(PollError::AssetLookup)?;
                TaskStatus::Succeeded { artifact }
            }
        };

        self.seen
            .lock()
            .expect("task status lock poisoned")
            .insert(task.clone(), status.clone());
        Ok(status)
    }

    /// Poll until the task settles or `max_wait` elapses. Transient poll
    /// errors are logged and retried on the next tick; a timeout returns
    /// [`TaskStatus::TimedOut`] without caching it, so later polls can
    /// still observe the real outcome.
    pub async fn await_completion(
        &self,
        task: &TaskId,
        max_wait: Duration,
        poll_interval: Duration,
    ) -> TaskStatus {
        let mut elapsed = Duration::ZERO;
        while elapsed < max_wait {
            sleep(poll_interval).await;
            elapsed += poll_interval;
            match self.poll(task).await {
                Ok(status) if status.is_terminal() => return status,
                Ok(status) => {
                    tracing::trace!(task = %task, ?status, ?elapsed, "video task in flight");
                }
                Err(e) => {
                    tracing::warn!(task = %task, error = %e, "poll failed, will retry");
                }
            }
        }
        tracing::warn!(task = %task, ?max_wait, "video task timed out");
        TaskStatus::TimedOut
    }

    /// Last cached status of a task, if it has been seen.
    pub fn last_known(&self, task: &TaskId) -> Option<TaskStatus> {
        self.seen
            .lock()
            .expect("task status lock poisoned")
            .get(task)
            .cloned()
    }
}
