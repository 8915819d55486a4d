//! Tests for builder modules

use std::time::Duration;

use prometheus_pacer::builders::SchedulerBuilder;
use prometheus_pacer::config::SchedulerConfig;
use prometheus_pacer::core::{PacingMode, SchedulerError};
use prometheus_pacer::runtime::TokioSpawner;
use prometheus_pacer::util::{DelayRange, ManualClock};

#[test]
fn test_scheduler_builder_defaults() {
    let builder = SchedulerBuilder::new();
    assert_eq!(builder.config(), &SchedulerConfig::default());
    assert_eq!(builder.config().max_concurrency, 1);
}

#[test]
fn test_scheduler_builder_accumulates_config() {
    let builder = SchedulerBuilder::new()
        .max_concurrency(8)
        .min_start_interval(Duration::from_millis(250))
        .pacing(PacingMode::FinishToStart)
        .jitter(DelayRange { min_ms: 5, max_ms: 15 });

    let config = builder.config();
    assert_eq!(config.max_concurrency, 8);
    assert_eq!(config.min_start_interval, Duration::from_millis(250));
    assert_eq!(config.pacing, PacingMode::FinishToStart);
    assert_eq!(config.jitter, Some(DelayRange { min_ms: 5, max_ms: 15 }));
}

#[tokio::test]
async fn test_scheduler_builder_with_clock_and_spawner() {
    let clock = ManualClock::new();
    let scheduler = SchedulerBuilder::new()
        .max_concurrency(2)
        .min_start_interval(Duration::from_millis(40))
        .clock(clock.clone())
        .build_with_spawner(TokioSpawner::current().unwrap())
        .unwrap();

    assert_eq!(scheduler.max_concurrency(), 2);
    let a = scheduler.submit(|| async { Ok::<_, String>(1) });
    let b = scheduler.submit(|| async { Ok::<_, String>(2) });
    assert_eq!(a.await, Ok(1));
    assert_eq!(b.await, Ok(2));
    assert_eq!(clock.elapsed(), Duration::from_millis(40));
}

#[tokio::test]
async fn test_scheduler_builder_rejects_invalid_config() {
    let result = SchedulerBuilder::new().max_concurrency(0).build();
    assert!(matches!(result, Err(SchedulerError::InvalidConfig(_))));
}

#[test]
fn test_scheduler_builder_needs_runtime() {
    let result = SchedulerBuilder::new().build();
    assert!(matches!(result, Err(SchedulerError::Runtime(_))));
}
