//! Work-stealing scheduler for Quill actors.
//!
//! Maps an unbounded population of lightweight actors onto a fixed pool
//! of OS threads. Each worker owns a FIFO run-queue and loops: run local
//! work, steal from a sibling when starved, vote for quiescence when
//! nothing is discoverable anywhere.
//!
//! ## Layout
//!
//! - **Run-queue** (`queue.rs`): per-worker crossbeam deque; owner pops
//!   the head without synchronization, remote threads go through the
//!   stealer or the inbound injector.
//! - **Worker** (`worker.rs`): the per-thread record and the
//!   running/stealing/voting state machine.
//! - **Steal protocol** (`steal.rs`): the thief/victim CAS handshake that
//!   keeps at most one thief per victim and every actor in at most one
//!   queue.
//! - **Quiescence** (`quiesce.rs`): two-phase idle vote (tally, then a
//!   confirmation sweep revalidated against the work epoch).
//! - **Pool** (`pool.rs`): thread lifecycle, core pinning, the public
//!   `add`/`respond`/`worksteal`/`terminate` surface.

mod pool;
mod queue;
mod quiesce;
mod steal;
mod worker;

pub use pool::{SchedConfig, SchedHandle, SchedulerPool, TerminationKind, WorkerStats};
