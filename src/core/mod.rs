//! Core scheduling: gates, admission queue, dispatch loop and handles.

pub mod error;
pub mod gate;
pub mod queue;
pub mod scheduler;
pub mod spawn;
pub mod stats;

pub use error::{AppResult, SchedulerError, TaskError};
pub use gate::{ConcurrencyGate, PacingGate, PacingMode};
pub use queue::TaskId;
pub use scheduler::{Scheduler, TaskHandle};
pub use spawn::Spawn;
pub use stats::SchedulerStats;
