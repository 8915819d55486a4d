//! Builder to construct schedulers from configuration.

use std::time::Duration;

use crate::config::SchedulerConfig;
use crate::core::{PacingMode, Scheduler, SchedulerError, Spawn};
use crate::runtime::TokioSpawner;
use crate::util::clock::{Clock, TokioClock};
use crate::util::range::DelayRange;

/// Fluent builder for [`Scheduler`].
///
/// ```rust,ignore
/// let scheduler = SchedulerBuilder::new()
///     .max_concurrency(4)
///     .min_start_interval(Duration::from_millis(250))
///     .build()?;
/// ```
#[derive(Debug, Clone)]
pub struct SchedulerBuilder<C = TokioClock> {
    config: SchedulerConfig,
    clock: C,
}

impl SchedulerBuilder {
    /// Builder with default configuration and the tokio clock.
    pub fn new() -> Self {
        Self::from_config(SchedulerConfig::default())
    }

    /// Builder seeded from an existing configuration.
    pub const fn from_config(config: SchedulerConfig) -> Self {
        Self {
            config,
            clock: TokioClock,
        }
    }
}

impl Default for SchedulerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> SchedulerBuilder<C> {
    /// Set the concurrency cap.
    #[must_use]
    pub fn max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.config.max_concurrency = max_concurrency;
        self
    }

    /// Set the minimum interval between dispatch starts.
    #[must_use]
    pub fn min_start_interval(mut self, interval: Duration) -> Self {
        self.config.min_start_interval = interval;
        self
    }

    /// Set the pacing mode.
    #[must_use]
    pub fn pacing(mut self, pacing: PacingMode) -> Self {
        self.config.pacing = pacing;
        self
    }

    /// Add a random delay range to every pacing wait.
    #[must_use]
    pub fn jitter(mut self, jitter: DelayRange) -> Self {
        self.config.jitter = Some(jitter);
        self
    }

    /// Swap the clock collaborator.
    pub fn clock<C2: Clock>(self, clock: C2) -> SchedulerBuilder<C2> {
        SchedulerBuilder {
            config: self.config,
            clock,
        }
    }

    /// Configuration accumulated so far.
    pub const fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Build on the current tokio runtime.
    pub fn build(self) -> Result<Scheduler<C, TokioSpawner>, SchedulerError> {
        let spawner = TokioSpawner::current()?;
        self.build_with_spawner(spawner)
    }

    /// Build with an explicit spawner.
    pub fn build_with_spawner<S: Spawn>(self, spawner: S) -> Result<Scheduler<C, S>, SchedulerError> {
        Scheduler::with_parts(self.config, self.clock, spawner)
    }
}
