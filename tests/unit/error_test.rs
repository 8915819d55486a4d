//! Tests for error types

use prometheus_pacer::core::{SchedulerError, TaskError};

#[test]
fn test_invalid_config_error() {
    let err = SchedulerError::InvalidConfig("max_concurrency must be greater than 0".to_string());
    assert_eq!(
        format!("{}", err),
        "invalid configuration: max_concurrency must be greater than 0"
    );
}

#[test]
fn test_runtime_error() {
    let err = SchedulerError::Runtime("no reactor running".to_string());
    assert_eq!(format!("{}", err), "runtime unavailable: no reactor running");
}

#[test]
fn test_task_failed_error() {
    let err: TaskError<String> = TaskError::Failed("upstream returned 429".to_string());
    assert_eq!(format!("{}", err), "task failed: upstream returned 429");
}

#[test]
fn test_task_abandoned_error() {
    let err: TaskError<String> = TaskError::Abandoned;
    assert_eq!(format!("{}", err), "task abandoned before settling");
    assert!(err.is_abandoned());
}
