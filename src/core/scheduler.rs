//! Concurrency-capped, paced task scheduler.
//!
//! # Design
//!
//! - **State mutex**: the admission queue and both gates live behind one
//!   `parking_lot::Mutex`, held only for short synchronous sections and never
//!   across an await.
//! - **Dispatch turn**: dispatch attempts are serialized by an async mutex
//!   that is held across the pacing wait. A second attempt can never pass
//!   the pacing gate for the same slot, while settling tasks only need the
//!   state mutex and are never blocked by a sleeping attempt.
//! - **Slot guard**: each dispatched task owns a guard that releases its
//!   concurrency slot on drop, so a panicking task still frees its slot and
//!   re-triggers dispatch.
//!
//! Every push and every release that leaves work queued spawns a new dispatch
//! attempt after the state change, so no wakeup is lost.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::oneshot;
use tracing::{debug, info, trace};

use crate::config::SchedulerConfig;
use crate::core::gate::{ConcurrencyGate, PacingGate, PacingMode};
use crate::core::queue::{AdmissionQueue, BoxFuture, Job, QueueItem, Settlement, TaskId};
use crate::core::stats::{SchedulerCounters, SchedulerStats};
use crate::core::{SchedulerError, Spawn, TaskError};
use crate::runtime::TokioSpawner;
use crate::util::clock::{Clock, TokioClock};
use crate::util::range::DelayRange;

/// Bookkeeping mutated only under the state mutex.
struct DispatchState {
    queue: AdmissionQueue,
    concurrency: ConcurrencyGate,
    pacing: PacingGate,
}

struct Inner<C, S> {
    state: Mutex<DispatchState>,
    /// Serializes dispatch attempts, including their pacing waits.
    dispatch_turn: tokio::sync::Mutex<()>,
    max_concurrency: usize,
    min_start_interval: Duration,
    pacing: PacingMode,
    jitter: Option<DelayRange>,
    counters: SchedulerCounters,
    next_id: AtomicU64,
    clock: C,
    spawner: S,
}

/// Dispatches submitted tasks under a concurrency cap and a start pacing
/// interval.
///
/// Cloning is cheap; clones share the same queue and gates. Independent
/// schedulers share nothing.
pub struct Scheduler<C = TokioClock, S = TokioSpawner> {
    inner: Arc<Inner<C, S>>,
}

impl<C, S> Clone for Scheduler<C, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl Scheduler {
    /// Create a scheduler on the current tokio runtime with the tokio clock.
    ///
    /// Fails with [`SchedulerError::InvalidConfig`] for invalid values and
    /// [`SchedulerError::Runtime`] when called outside a tokio runtime.
    pub fn new(config: SchedulerConfig) -> Result<Self, SchedulerError> {
        Self::with_parts(config, TokioClock, TokioSpawner::current()?)
    }
}

impl<C, S> Scheduler<C, S>
where
    C: Clock,
    S: Spawn,
{
    /// Create a scheduler from explicit clock and spawner collaborators.
    pub fn with_parts(config: SchedulerConfig, clock: C, spawner: S) -> Result<Self, SchedulerError> {
        config.validate().map_err(SchedulerError::InvalidConfig)?;

        info!(
            max_concurrency = config.max_concurrency,
            min_start_interval = ?config.min_start_interval,
            pacing = ?config.pacing,
            jitter = ?config.jitter,
            "scheduler created"
        );

        let state = DispatchState {
            queue: AdmissionQueue::new(),
            concurrency: ConcurrencyGate::new(config.max_concurrency),
            pacing: PacingGate::new(config.min_start_interval(), config.pacing),
        };

        Ok(Self {
            inner: Arc::new(Inner {
                state: Mutex::new(state),
                dispatch_turn: tokio::sync::Mutex::new(()),
                max_concurrency: config.max_concurrency,
                min_start_interval: config.min_start_interval,
                pacing: config.pacing,
                jitter: config.jitter,
                counters: SchedulerCounters::default(),
                next_id: AtomicU64::new(1),
                clock,
                spawner,
            }),
        })
    }

    /// Queue a task for dispatch.
    ///
    /// `task` is invoked once the scheduler admits it; the returned handle
    /// resolves with the task's value, or with [`TaskError::Failed`] carrying
    /// the task's own error. Dropping the handle does not cancel the task.
    pub fn submit<F, Fut, T, E>(&self, task: F) -> TaskHandle<T, E>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        T: Send + 'static,
        E: Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);

        let job: Job = Box::new(move || -> BoxFuture<Settlement> {
            Box::pin(async move {
                let outcome = task().await;
                let settlement = if outcome.is_ok() {
                    Settlement::Succeeded
                } else {
                    Settlement::Failed
                };
                // the caller may have dropped its handle; the task still settled
                let _ = tx.send(outcome);
                settlement
            })
        });

        let queued = {
            let mut state = self.inner.state.lock();
            state
                .queue
                .push(QueueItem::new(id, self.inner.clock.now(), job));
            state.queue.len()
        };
        self.inner.counters.submitted.fetch_add(1, Ordering::Relaxed);
        debug!(task_id = id, queued, "task submitted");

        self.inner.request_dispatch();
        TaskHandle { id, rx }
    }

    /// Tasks waiting for admission.
    pub fn queued(&self) -> usize {
        self.inner.state.lock().queue.len()
    }

    /// Tasks currently running.
    pub fn running(&self) -> usize {
        self.inner.state.lock().concurrency.running()
    }

    /// Configured concurrency cap.
    pub fn max_concurrency(&self) -> usize {
        self.inner.max_concurrency
    }

    /// Configured minimum start interval.
    pub fn min_start_interval(&self) -> Duration {
        self.inner.min_start_interval
    }

    /// Configured pacing mode.
    pub fn pacing_mode(&self) -> PacingMode {
        self.inner.pacing
    }

    /// Snapshot of queue depth, running count and lifetime counters.
    pub fn stats(&self) -> SchedulerStats {
        let (queued, running) = {
            let state = self.inner.state.lock();
            (state.queue.len(), state.concurrency.running())
        };
        self.inner
            .counters
            .snapshot(self.inner.max_concurrency, queued, running)
    }
}

impl<C, S> Inner<C, S>
where
    C: Clock,
    S: Spawn,
{
    fn request_dispatch(self: &Arc<Self>) {
        let inner = Arc::clone(self);
        self.spawner.spawn(async move { inner.dispatch().await });
    }

    /// Admit queued items while both gates allow, one item per iteration.
    async fn dispatch(self: Arc<Self>) {
        let _turn = self.dispatch_turn.lock().await;

        loop {
            let wait = {
                let state = self.state.lock();
                if state.queue.is_empty() || !state.concurrency.has_headroom() {
                    return;
                }
                let extra = self.jitter.as_ref().map_or(Duration::ZERO, DelayRange::sample);
                state.pacing.wait_time(self.clock.now(), extra)
            };

            if let Some(wait) = wait {
                trace!(wait_ms = wait.as_millis(), "pacing gate holding next dispatch");
                self.clock.sleep(wait).await;
            }

            let item = {
                let mut state = self.state.lock();
                // only this turn pops, so the item seen above is still there
                let Some(item) = state.queue.pop_front() else {
                    return;
                };
                state.concurrency.acquire();
                state.pacing.on_dispatch(self.clock.now());
                item
            };

            self.launch(item);
        }
    }

    fn launch(self: &Arc<Self>, item: QueueItem) {
        let task_id = item.id();
        let queued_for = self.clock.now().saturating_duration_since(item.enqueued_at());
        self.counters.dispatched.fetch_add(1, Ordering::Relaxed);
        debug!(task_id, queued_ms = queued_for.as_millis(), "task dispatched");

        let slot = Slot {
            inner: Arc::clone(self),
            task_id,
        };
        self.spawner.spawn(async move {
            let settlement = item.start().await;
            slot.inner.counters.record(settlement);
            drop(slot);
        });
    }

    fn release_slot(self: &Arc<Self>, task_id: TaskId) {
        let (running, queued) = {
            let mut state = self.state.lock();
            state.concurrency.release();
            state.pacing.on_settle(self.clock.now());
            (state.concurrency.running(), state.queue.len())
        };
        trace!(task_id, running, queued, "slot released");
        if queued > 0 {
            self.request_dispatch();
        }
    }
}

/// Concurrency slot held by a dispatched task; released on drop.
struct Slot<C, S>
where
    C: Clock,
    S: Spawn,
{
    inner: Arc<Inner<C, S>>,
    task_id: TaskId,
}

impl<C, S> Drop for Slot<C, S>
where
    C: Clock,
    S: Spawn,
{
    fn drop(&mut self) {
        self.inner.release_slot(self.task_id);
    }
}

/// Completion handle returned by [`Scheduler::submit`].
///
/// Resolves exactly once: with the task's value, its own error wrapped in
/// [`TaskError::Failed`], or [`TaskError::Abandoned`] if the task never
/// settled.
#[derive(Debug)]
#[must_use = "dropping the handle discards the task's outcome"]
pub struct TaskHandle<T, E> {
    id: TaskId,
    rx: oneshot::Receiver<Result<T, E>>,
}

impl<T, E> TaskHandle<T, E> {
    /// Identifier of the submitted task, as it appears in log records.
    pub const fn id(&self) -> TaskId {
        self.id
    }
}

impl<T, E> Future for TaskHandle<T, E> {
    type Output = Result<T, TaskError<E>>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx).poll(cx).map(|received| match received {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(TaskError::Failed(e)),
            Err(_) => Err(TaskError::Abandoned),
        })
    }
}
