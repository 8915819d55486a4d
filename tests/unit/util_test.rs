//! Tests for utility functions

use std::time::Duration;

use prometheus_pacer::util::{init_tracing, Clock, DelayRange, ManualClock, TokioClock};

#[test]
fn test_delay_range_bounds() {
    let range = DelayRange::new(1000, 5000).unwrap();
    assert_eq!(range.min_ms, 1000);
    assert_eq!(range.max_ms, 5000);
    let sample = range.sample();
    assert!(sample >= Duration::from_millis(1000));
    assert!(sample <= Duration::from_millis(5000));
}

#[test]
fn test_delay_range_rejects_min_above_max() {
    assert!(DelayRange::new(2, 1).is_err());
}

#[tokio::test]
async fn test_manual_clock_is_virtual() {
    let clock = ManualClock::new();
    let before = clock.now();
    clock.sleep(Duration::from_secs(3600)).await;
    assert_eq!(clock.now() - before, Duration::from_secs(3600));
}

#[tokio::test(start_paused = true)]
async fn test_tokio_clock_sleep() {
    let clock = TokioClock;
    let before = clock.now();
    clock.sleep(Duration::from_millis(75)).await;
    assert!(clock.now() - before >= Duration::from_millis(75));
}

#[test]
fn test_init_tracing_is_idempotent() {
    init_tracing();
    init_tracing();
}
