//! Scheduler configuration structures.

use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::core::{AppResult, PacingMode};
use crate::util::range::DelayRange;

/// Env var holding the concurrency cap.
pub const ENV_MAX_CONCURRENCY: &str = "PACER_MAX_CONCURRENCY";
/// Env var holding the minimum start interval in milliseconds.
pub const ENV_MIN_START_INTERVAL_MS: &str = "PACER_MIN_START_INTERVAL_MS";
/// Env var holding the pacing mode (`start_to_start` or `finish_to_start`).
pub const ENV_PACING: &str = "PACER_PACING";
/// Env var holding the jitter lower bound in milliseconds.
pub const ENV_JITTER_MIN_MS: &str = "PACER_JITTER_MIN_MS";
/// Env var holding the jitter upper bound in milliseconds.
pub const ENV_JITTER_MAX_MS: &str = "PACER_JITTER_MAX_MS";

/// Scheduler configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Maximum number of simultaneously running tasks.
    pub max_concurrency: usize,
    /// Minimum gap between dispatch starts. Stored at full precision;
    /// (de)serialized as `min_start_interval_ms`, fractions allowed.
    #[serde(rename = "min_start_interval_ms", with = "duration_ms", default)]
    pub min_start_interval: Duration,
    /// Which instant the interval is measured from.
    #[serde(default)]
    pub pacing: PacingMode,
    /// Optional random delay added to the interval for each dispatch.
    #[serde(default)]
    pub jitter: Option<DelayRange>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            max_concurrency: 1,
            min_start_interval: Duration::ZERO,
            pacing: PacingMode::default(),
            jitter: None,
        }
    }
}

impl SchedulerConfig {
    /// Start-to-start paced configuration.
    pub fn new(max_concurrency: usize, min_start_interval: Duration) -> Self {
        Self {
            max_concurrency,
            min_start_interval,
            ..Self::default()
        }
    }

    /// Set the pacing mode.
    #[must_use]
    pub fn with_pacing(mut self, pacing: PacingMode) -> Self {
        self.pacing = pacing;
        self
    }

    /// Set the start jitter range.
    #[must_use]
    pub fn with_jitter(mut self, jitter: DelayRange) -> Self {
        self.jitter = Some(jitter);
        self
    }

    /// Minimum start interval.
    pub const fn min_start_interval(&self) -> Duration {
        self.min_start_interval
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_concurrency == 0 {
            return Err("max_concurrency must be greater than 0".into());
        }
        if let Some(jitter) = &self.jitter {
            jitter.validate()?;
        }
        Ok(())
    }

    /// Parse configuration from a JSON string and validate.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load configuration from the process environment, reading a `.env`
    /// file first if one exists.
    pub fn from_env() -> AppResult<Self> {
        // a missing .env file is fine; real env vars still apply
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// Unset keys fall back to [`SchedulerConfig::default`].
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let max_concurrency =
            parse_var(&lookup, ENV_MAX_CONCURRENCY)?.unwrap_or(defaults.max_concurrency);
        let min_start_interval = match lookup(ENV_MIN_START_INTERVAL_MS) {
            Some(raw) => raw
                .trim()
                .parse::<f64>()
                .map_err(|e| e.to_string())
                .and_then(duration_ms::from_millis_f64)
                .map_err(anyhow::Error::msg)
                .with_context(|| format!("{ENV_MIN_START_INTERVAL_MS} has invalid value `{raw}`"))?,
            None => defaults.min_start_interval,
        };
        let pacing = match lookup(ENV_PACING) {
            Some(raw) => raw
                .parse::<PacingMode>()
                .map_err(anyhow::Error::msg)
                .with_context(|| format!("{ENV_PACING} is invalid"))?,
            None => defaults.pacing,
        };
        let jitter = match (
            parse_var(&lookup, ENV_JITTER_MIN_MS)?,
            parse_var(&lookup, ENV_JITTER_MAX_MS)?,
        ) {
            (Some(min_ms), Some(max_ms)) => Some(DelayRange { min_ms, max_ms }),
            (None, None) => None,
            _ => anyhow::bail!("{ENV_JITTER_MIN_MS} and {ENV_JITTER_MAX_MS} must be set together"),
        };

        let cfg = Self {
            max_concurrency,
            min_start_interval,
            pacing,
            jitter,
        };
        cfg.validate().map_err(anyhow::Error::msg)?;
        Ok(cfg)
    }
}

/// Serde adapter for a `Duration` written as (possibly fractional)
/// milliseconds. Whole values serialize as integers.
mod duration_ms {
    use std::time::Duration;

    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(val: &Duration, s: S) -> Result<S::Ok, S::Error> {
        if val.subsec_nanos() % 1_000_000 == 0 {
            s.serialize_u64(u64::try_from(val.as_millis()).unwrap_or(u64::MAX))
        } else {
            #[allow(clippy::cast_precision_loss)]
            let ms = val.as_nanos() as f64 / 1e6;
            s.serialize_f64(ms)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let ms = f64::deserialize(d)?;
        from_millis_f64(ms).map_err(de::Error::custom)
    }

    pub fn from_millis_f64(ms: f64) -> Result<Duration, String> {
        if !ms.is_finite() || ms < 0.0 {
            return Err(format!("interval must be a non-negative number of milliseconds, got {ms}"));
        }
        Duration::try_from_secs_f64(ms / 1000.0).map_err(|e| e.to_string())
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> AppResult<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .with_context(|| format!("{key} has invalid value `{raw}`"))
        })
        .transpose()
}
