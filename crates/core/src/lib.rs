//! Shared types for the tutorkit dispatch layer.
//!
//! This crate provides the data model exchanged between the fallback
//! dispatcher and the provider clients: `GenerationRequest`, `ChatTurn`,
//! `NormalizedResult`, the `Generate` trait, the task-status vocabulary,
//! and the error taxonomy that fallback decisions switch on.

pub use capability::Capability;
pub use error::{AttemptFailure, DispatchError, PollError, ProviderError};
pub use generate::Generate;
pub use message::{ChatTurn, HISTORY_WINDOW, Role, recent_turns};
pub use prompt::{REASONING_PROMPT, STUDY_PROMPT, offline_reply, system_prompt};
pub use request::{GenerationRequest, PromptMode};
pub use result::NormalizedResult;
pub use scripted::ScriptedProvider;
pub use task::{TaskId, TaskStatus};

mod capability;
mod error;
mod generate;
mod message;
mod prompt;
mod request;
mod result;
mod scripted;
mod task;
