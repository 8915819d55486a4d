//! Runtime adapters for spawning dispatched work.

pub mod tokio_spawner;

pub use tokio_spawner::TokioSpawner;
