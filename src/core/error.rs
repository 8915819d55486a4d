//! Error types for scheduler operations.

use thiserror::Error;

/// Errors produced while constructing or configuring a scheduler.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// Configuration values violate a scheduler invariant.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// No async runtime is available to run dispatched work.
    #[error("runtime unavailable: {0}")]
    Runtime(String),
}

/// Failure delivered through a [`TaskHandle`](crate::core::TaskHandle).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaskError<E> {
    /// The task ran and failed; carries the task's own error unchanged.
    #[error("task failed: {0}")]
    Failed(E),
    /// The task never settled (it panicked, or its runtime shut down).
    #[error("task abandoned before settling")]
    Abandoned,
}

impl<E> TaskError<E> {
    /// Returns the task's own error, if the task actually failed.
    pub fn into_failure(self) -> Option<E> {
        match self {
            Self::Failed(e) => Some(e),
            Self::Abandoned => None,
        }
    }

    /// True when the task never produced an outcome.
    pub const fn is_abandoned(&self) -> bool {
        matches!(self, Self::Abandoned)
    }
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
