//! Quill runtime scheduling core.
//!
//! This crate is the heart of the Quill actor runtime: it multiplexes
//! actors across a fixed pool of OS worker threads, balances load via
//! work stealing, and detects global quiescence to end a run cleanly.
//!
//! It deliberately knows nothing about what an actor *is* beyond
//! [`Actor::run_batch`]: mailboxes, message dispatch, and actor heaps
//! live in the layers above. The runtime hands the scheduler an
//! [`ActorHandle`] when an actor becomes runnable and gets it back
//! (conceptually) when the actor blocks or finishes.
//!
//! ## Modules
//!
//! - [`actor`]: the opaque runnable-actor boundary
//! - [`sched`]: run-queues, workers, the steal protocol, quiescence
//!   detection, and the [`SchedulerPool`] lifecycle
//! - [`error`]: pool start/config errors

pub mod actor;
pub mod error;
pub mod sched;

pub use actor::{Actor, ActorHandle, ActorId, RunOutcome};
pub use error::SchedError;
pub use sched::{SchedConfig, SchedHandle, SchedulerPool, TerminationKind, WorkerStats};
