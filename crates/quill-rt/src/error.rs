//! Error type for the pool lifecycle boundary.
//!
//! Steady-state scheduling has no recoverable errors -- the atomic
//! protocols prevent them by construction. The only failures a caller can
//! see are at pool construction and start.

use thiserror::Error;

/// Errors surfaced by `SchedulerPool::new` and `SchedulerPool::start`.
#[derive(Debug, Error)]
pub enum SchedError {
    /// A pool with zero worker threads was requested.
    #[error("scheduler pool requires at least one worker thread")]
    ZeroWorkers,

    /// The pool was already started; the lifecycle is init -> start -> stop,
    /// not reusable.
    #[error("scheduler pool already started")]
    AlreadyStarted,

    /// An OS thread could not be created. The pool does not partially
    /// start: workers spawned before the failure are torn down before this
    /// is returned.
    #[error("failed to spawn worker thread {index}")]
    ThreadSpawn {
        index: usize,
        #[source]
        source: std::io::Error,
    },
}
