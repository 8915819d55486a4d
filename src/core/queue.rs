//! FIFO admission queue holding not-yet-started work.

use std::collections::VecDeque;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::time::Instant;

/// Identifier assigned to each submitted task, in submission order.
pub type TaskId = u64;

/// Boxed future returned by a type-erased job.
pub(crate) type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send + 'static>>;

/// Type-erased work: starts the caller's task, delivers its outcome to the
/// completion handle and reports how it settled.
pub(crate) type Job = Box<dyn FnOnce() -> BoxFuture<Settlement> + Send + 'static>;

/// How a task settled, as seen by the scheduler's counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Settlement {
    Succeeded,
    Failed,
}

/// One queued unit of work together with its completion path.
pub(crate) struct QueueItem {
    id: TaskId,
    enqueued_at: Instant,
    job: Job,
}

impl QueueItem {
    pub(crate) fn new(id: TaskId, enqueued_at: Instant, job: Job) -> Self {
        Self {
            id,
            enqueued_at,
            job,
        }
    }

    pub(crate) const fn id(&self) -> TaskId {
        self.id
    }

    pub(crate) const fn enqueued_at(&self) -> Instant {
        self.enqueued_at
    }

    /// Start the task. The returned future settles the completion handle.
    pub(crate) fn start(self) -> BoxFuture<Settlement> {
        (self.job)()
    }
}

impl fmt::Debug for QueueItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueueItem")
            .field("id", &self.id)
            .field("enqueued_at", &self.enqueued_at)
            .finish_non_exhaustive()
    }
}

/// First-in-first-out queue of admitted-but-not-started items.
#[derive(Debug, Default)]
pub(crate) struct AdmissionQueue {
    items: VecDeque<QueueItem>,
}

impl AdmissionQueue {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, item: QueueItem) {
        self.items.push_back(item);
    }

    pub(crate) fn pop_front(&mut self) -> Option<QueueItem> {
        self.items.pop_front()
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
