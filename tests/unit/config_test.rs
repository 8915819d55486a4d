//! Tests for configuration validation

use std::time::Duration;

use prometheus_pacer::config::SchedulerConfig;
use prometheus_pacer::core::PacingMode;
use prometheus_pacer::util::DelayRange;

#[test]
fn test_scheduler_config_validation() {
    let valid = SchedulerConfig::new(3, Duration::from_millis(200));
    assert!(valid.validate().is_ok());
    assert_eq!(valid.pacing, PacingMode::StartToStart);
    assert_eq!(valid.min_start_interval(), Duration::from_millis(200));
}

#[test]
fn test_scheduler_config_zero_concurrency() {
    let invalid = SchedulerConfig::new(0, Duration::ZERO);
    assert!(invalid.validate().is_err());
}

#[test]
fn test_scheduler_config_inverted_jitter() {
    let invalid = SchedulerConfig::new(1, Duration::ZERO).with_jitter(DelayRange {
        min_ms: 500,
        max_ms: 100,
    });
    assert!(invalid.validate().is_err());
}

#[test]
fn test_scheduler_config_from_json() {
    let json = r#"{
        "max_concurrency": 3,
        "min_start_interval_ms": 200,
        "pacing": "finish_to_start",
        "jitter": { "min_ms": 0, "max_ms": 50 }
    }"#;

    let config = SchedulerConfig::from_json_str(json).unwrap();
    assert_eq!(config.max_concurrency, 3);
    assert_eq!(config.min_start_interval, Duration::from_millis(200));
    assert_eq!(config.pacing, PacingMode::FinishToStart);
    assert_eq!(config.jitter, Some(DelayRange { min_ms: 0, max_ms: 50 }));
}

#[test]
fn test_scheduler_config_from_json_defaults() {
    let config = SchedulerConfig::from_json_str(r#"{ "max_concurrency": 2 }"#).unwrap();
    assert_eq!(config.min_start_interval(), Duration::ZERO);
    assert_eq!(config.pacing, PacingMode::StartToStart);
    assert!(config.jitter.is_none());
}

#[test]
fn test_scheduler_config_from_json_rejects_invalid() {
    assert!(SchedulerConfig::from_json_str(r#"{ "max_concurrency": 0 }"#).is_err());
    assert!(SchedulerConfig::from_json_str(r#"{ "min_start_interval_ms": 10 }"#).is_err());
    assert!(SchedulerConfig::from_json_str("not json").is_err());
}

#[test]
fn test_scheduler_config_json_round_trip() {
    let config = SchedulerConfig::new(5, Duration::from_millis(75)).with_pacing(PacingMode::FinishToStart);
    let json = serde_json::to_string(&config).unwrap();
    assert!(json.contains("\"pacing\":\"finish_to_start\""));
    assert_eq!(SchedulerConfig::from_json_str(&json).unwrap(), config);
}
