//! Admission gates consulted by the dispatch loop.
//!
//! Both gates are plain state machines with no locking of their own; the
//! scheduler keeps them behind its state mutex and evaluates them once per
//! admitted item.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Caps the number of simultaneously running tasks.
#[derive(Debug, Clone)]
pub struct ConcurrencyGate {
    max: usize,
    running: usize,
}

impl ConcurrencyGate {
    /// Create a gate admitting at most `max` concurrent tasks.
    pub const fn new(max: usize) -> Self {
        Self { max, running: 0 }
    }

    /// True if another task may start now.
    pub const fn has_headroom(&self) -> bool {
        self.running < self.max
    }

    /// Mark one more task as running.
    pub fn acquire(&mut self) {
        debug_assert!(self.has_headroom(), "concurrency gate over-admitted");
        self.running += 1;
    }

    /// Mark one running task as settled.
    pub fn release(&mut self) {
        debug_assert!(self.running > 0, "concurrency gate released while idle");
        self.running = self.running.saturating_sub(1);
    }

    /// Tasks currently running.
    pub const fn running(&self) -> usize {
        self.running
    }

    /// Configured cap.
    pub const fn max(&self) -> usize {
        self.max
    }
}

/// Which instant the pacing interval is measured from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PacingMode {
    /// Interval between consecutive dispatch starts.
    #[default]
    StartToStart,
    /// Interval between the most recent settlement and the next start.
    FinishToStart,
}

impl std::str::FromStr for PacingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "start_to_start" => Ok(Self::StartToStart),
            "finish_to_start" => Ok(Self::FinishToStart),
            other => Err(format!("unknown pacing mode `{other}`")),
        }
    }
}

/// Enforces a minimum interval before the next dispatch start.
#[derive(Debug, Clone)]
pub struct PacingGate {
    min_interval: Duration,
    mode: PacingMode,
    /// Reference instant; `None` until the first dispatch (or settlement).
    last_mark: Option<Instant>,
}

impl PacingGate {
    /// Create a gate with the given interval and measuring mode.
    pub const fn new(min_interval: Duration, mode: PacingMode) -> Self {
        Self {
            min_interval,
            mode,
            last_mark: None,
        }
    }

    /// How long the next dispatch must still wait at `now`.
    ///
    /// `extra` is added on top of the configured interval (start jitter).
    /// Returns `None` when the dispatch may proceed immediately.
    pub fn wait_time(&self, now: Instant, extra: Duration) -> Option<Duration> {
        let interval = self.min_interval.saturating_add(extra);
        if interval.is_zero() {
            return None;
        }
        let mark = self.last_mark?;
        let elapsed = now.saturating_duration_since(mark);
        interval.checked_sub(elapsed).filter(|wait| !wait.is_zero())
    }

    /// Record that a task was released to run at `now`.
    pub fn on_dispatch(&mut self, now: Instant) {
        if self.mode == PacingMode::StartToStart {
            self.last_mark = Some(now);
        }
    }

    /// Record that a running task settled at `now`.
    pub fn on_settle(&mut self, now: Instant) {
        if self.mode == PacingMode::FinishToStart {
            self.last_mark = Some(now);
        }
    }

    /// Most recent reference instant.
    pub const fn last_mark(&self) -> Option<Instant> {
        self.last_mark
    }

    /// Configured minimum interval.
    pub const fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Configured measuring mode.
    pub const fn mode(&self) -> PacingMode {
        self.mode
    }
}
