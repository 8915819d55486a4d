//! Scheduler utilization counters.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::core::queue::Settlement;

/// Statistics about scheduler utilization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerStats {
    /// Configured concurrency cap.
    pub max_concurrency: usize,

    /// Tasks waiting for admission.
    pub queued: usize,

    /// Tasks currently running.
    pub running: usize,

    /// Total tasks submitted.
    pub submitted: u64,

    /// Total tasks released to run.
    pub dispatched: u64,

    /// Total tasks that resolved with a value.
    pub succeeded: u64,

    /// Total tasks that resolved with an error.
    pub failed: u64,
}

/// Lock-free lifetime counters.
#[derive(Debug, Default)]
pub(crate) struct SchedulerCounters {
    pub(crate) submitted: AtomicU64,
    pub(crate) dispatched: AtomicU64,
    succeeded: AtomicU64,
    failed: AtomicU64,
}

impl SchedulerCounters {
    pub(crate) fn record(&self, settlement: Settlement) {
        let counter = match settlement {
            Settlement::Succeeded => &self.succeeded,
            Settlement::Failed => &self.failed,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self, max_concurrency: usize, queued: usize, running: usize) -> SchedulerStats {
        SchedulerStats {
            max_concurrency,
            queued,
            running,
            submitted: self.submitted.load(Ordering::Relaxed),
            dispatched: self.dispatched.load(Ordering::Relaxed),
            succeeded: self.succeeded.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }
}
