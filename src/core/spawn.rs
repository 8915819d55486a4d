//! Abstraction for spawning dispatched work on a runtime.

use std::future::Future;

/// Runs futures launched by the scheduler.
///
/// The scheduler spawns two kinds of futures: dispatch attempts and the
/// dispatched tasks themselves. Implementations must run them concurrently.
pub trait Spawn: Send + Sync + 'static {
    /// Spawn a detached future.
    fn spawn<F>(&self, fut: F)
    where
        F: Future<Output = ()> + Send + 'static;
}
