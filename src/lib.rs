//! # Prometheus Pacer
//!
//! A concurrency-capped, start-paced task dispatcher for workloads that call
//! rate-limited external resources (HTTP APIs, model endpoints, metered
//! services).
//!
//! Callers submit asynchronous work; the [`Scheduler`](core::Scheduler)
//! decides when each item may begin and hands the outcome back through a
//! one-shot [`TaskHandle`](core::TaskHandle). Two independent gates control
//! admission:
//!
//! - **Concurrency Gate**: at most `max_concurrency` tasks are in flight.
//! - **Pacing Gate**: consecutive dispatch starts are separated by at least
//!   `min_start_interval`, regardless of how long each task runs.
//!
//! Queued work is admitted strictly first-in-first-out. A failing task only
//! affects its own handle; its slot is released and the queue keeps moving.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use prometheus_pacer::core::{Scheduler, TaskError};
//! use prometheus_pacer::config::SchedulerConfig;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let scheduler = Scheduler::new(SchedulerConfig::new(2, Duration::from_millis(500)))?;
//!
//! let handles: Vec<_> = (0..10)
//!     .map(|page| {
//!         scheduler.submit(move || async move {
//!             // call the rate-limited API here
//!             Ok::<_, std::io::Error>(page * 2)
//!         })
//!     })
//!     .collect();
//!
//! for handle in handles {
//!     match handle.await {
//!         Ok(value) => println!("page -> {value}"),
//!         Err(TaskError::Failed(e)) => eprintln!("request failed: {e}"),
//!         Err(TaskError::Abandoned) => eprintln!("request never settled"),
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! For deterministic timing in tests, inject a clock with
//! [`SchedulerBuilder::clock`](builders::SchedulerBuilder::clock): either
//! [`ManualClock`](util::clock::ManualClock) or tokio's paused time through
//! the default [`TokioClock`](util::clock::TokioClock).

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Core scheduling: gates, admission queue, dispatch loop and handles.
pub mod core;
/// Configuration models for the scheduler.
pub mod config;
/// Builders to construct schedulers from configuration.
pub mod builders;
/// Runtime adapters for spawning dispatched work.
pub mod runtime;
/// Shared utilities: clocks, delay ranges, telemetry.
pub mod util;
