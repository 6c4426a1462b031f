//! Runnable-actor boundary between the scheduler and the actor layer.
//!
//! The scheduler knows nothing about mailboxes, message dispatch, or actor
//! heaps. It sees an opaque [`ActorHandle`] and invokes [`Actor::run_batch`]
//! on it -- one scheduling quantum. Everything else (what the batch does,
//! when a blocked actor becomes runnable again) is the actor layer's job.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

// ---------------------------------------------------------------------------
// ActorId
// ---------------------------------------------------------------------------

/// Unique identifier for a scheduled actor.
///
/// Ids are assigned sequentially from a global atomic counter, guaranteeing
/// uniqueness within a single runtime instance.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActorId(pub u64);

impl ActorId {
    /// Generate a fresh, globally unique actor id.
    pub fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        ActorId(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Return the raw numeric value.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ActorId({})", self.0)
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<a.{}>", self.0)
    }
}

// ---------------------------------------------------------------------------
// RunOutcome
// ---------------------------------------------------------------------------

/// What a scheduling quantum decided about the actor's future.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The actor still has work; put it back on the worker's run-queue.
    Reschedule,
    /// The actor is waiting (empty mailbox, pending I/O). The scheduler
    /// drops its claim; the actor layer re-injects the handle via
    /// `SchedulerPool::add` when the actor becomes runnable again.
    Blocked,
    /// The actor terminated. The scheduler drops its claim for good.
    Finished,
}

// ---------------------------------------------------------------------------
// Actor
// ---------------------------------------------------------------------------

/// One schedulable unit, as the scheduler sees it.
///
/// `run_batch` executes one quantum: typically draining a slice of the
/// actor's mailbox. It runs on exactly one worker thread at a time -- the
/// scheduler holds an exclusive claim on the handle from the moment it is
/// queued until the quantum returns.
pub trait Actor: Send + Sync {
    /// Execute one scheduling quantum and report what to do next.
    fn run_batch(&self) -> RunOutcome;
}

// ---------------------------------------------------------------------------
// ActorHandle
// ---------------------------------------------------------------------------

/// Reference to a runnable actor.
///
/// The actor object itself is owned (reference-counted) by the wider
/// runtime. While a handle sits in a run-queue or executes a quantum, that
/// handle instance *is* the scheduler's exclusive claim: it moves into the
/// queue on push, out on pop or steal, and is never cloned by the
/// scheduler. An actor therefore resides in at most one run-queue at any
/// instant as long as the actor layer does not inject the same actor twice
/// without an intervening `Blocked`/`Finished`.
#[derive(Clone)]
pub struct ActorHandle {
    id: ActorId,
    inner: Arc<dyn Actor>,
}

impl ActorHandle {
    /// Wrap an actor object, assigning it a fresh id.
    pub fn new(actor: Arc<dyn Actor>) -> Self {
        ActorHandle {
            id: ActorId::next(),
            inner: actor,
        }
    }

    /// The actor's unique id.
    pub fn id(&self) -> ActorId {
        self.id
    }

    /// Execute one scheduling quantum.
    pub fn run_batch(&self) -> RunOutcome {
        self.inner.run_batch()
    }
}

impl fmt::Debug for ActorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActorHandle").field("id", &self.id).finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
