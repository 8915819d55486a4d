//! Inclusive millisecond ranges used for randomized start jitter.

use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::SchedulerError;

/// Inclusive range of delays in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayRange {
    /// Lower bound (inclusive).
    pub min_ms: u64,
    /// Upper bound (inclusive).
    pub max_ms: u64,
}

impl DelayRange {
    /// Create a range, rejecting `min_ms > max_ms`.
    pub fn new(min_ms: u64, max_ms: u64) -> Result<Self, SchedulerError> {
        let range = Self { min_ms, max_ms };
        range.validate().map_err(SchedulerError::InvalidConfig)?;
        Ok(range)
    }

    /// Check the bounds.
    pub fn validate(&self) -> Result<(), String> {
        if self.min_ms > self.max_ms {
            return Err(format!(
                "jitter min_ms ({}) must be less than or equal to max_ms ({})",
                self.min_ms, self.max_ms
            ));
        }
        Ok(())
    }

    /// Draw a random delay within the range.
    pub fn sample(&self) -> Duration {
        if self.min_ms >= self.max_ms {
            return Duration::from_millis(self.min_ms);
        }
        Duration::from_millis(rand::rng().random_range(self.min_ms..=self.max_ms))
    }
}
