//! Per-worker state and the main scheduling loop.
//!
//! Each worker owns one OS thread and one run-queue, and cycles through
//! three states:
//!
//! - **running local**: pop from the own queue (refilling from the inbound
//!   injector when the deque runs dry) and execute one quantum per actor.
//! - **stealing**: sweep the other workers for stealable work, starting at
//!   the current victim (see `steal.rs`). Skipped entirely under forced
//!   core distribution.
//! - **voting idle**: join the quiescence vote (see `quiesce.rs`); either
//!   resumes with work discoverable or exits the loop on termination.
//!
//! The fields of [`WorkerShared`] split into two groups: `victim` and the
//! counters are written (almost) only by the owning worker, while `thief`
//! is written by remote stealers mid-handshake. `thief` sits behind
//! `CachePadded` so remote CAS traffic does not thrash the cache line the
//! owner's hot path reads.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossbeam_deque::{Injector, Stealer};
use crossbeam_utils::CachePadded;
use parking_lot::{Condvar, Mutex};

use crate::actor::{ActorHandle, RunOutcome};
use crate::sched::pool::PoolShared;
use crate::sched::queue::RunQueue;
use crate::sched::quiesce::{self, Vote};
use crate::sched::steal;

/// Sentinel for "no thief currently registered" in the thief slot.
pub(crate) const NO_THIEF: usize = usize::MAX;

/// Idle workers recheck the world at this interval while parked, so a
/// missed wakeup costs at most one timeout.
pub(crate) const PARK_TIMEOUT: Duration = Duration::from_millis(1);

// ---------------------------------------------------------------------------
// Parker
// ---------------------------------------------------------------------------

/// Per-worker parking primitive. Each worker parks on its own
/// mutex/condvar pair to avoid contention on a single global lock.
pub(crate) struct Parker {
    lock: Mutex<()>,
    cond: Condvar,
}

impl Parker {
    pub(crate) fn new() -> Self {
        Parker {
            lock: Mutex::new(()),
            cond: Condvar::new(),
        }
    }

    /// Block until notified or the timeout elapses.
    pub(crate) fn park(&self, timeout: Duration) {
        let mut guard = self.lock.lock();
        let _ = self.cond.wait_for(&mut guard, timeout);
    }

    /// Wake the parked worker, if any.
    pub(crate) fn notify(&self) {
        self.cond.notify_all();
    }
}

// ---------------------------------------------------------------------------
// WorkerShared
// ---------------------------------------------------------------------------

/// The cross-thread-visible half of one worker.
///
/// Owned by the pool; the worker thread itself additionally owns the
/// `RunQueue` this record's `stealer` points into.
pub(crate) struct WorkerShared {
    /// Index of this worker in the pool.
    pub(crate) index: usize,

    /// Logical core this worker pins to at startup, if pinning is on.
    pub(crate) core: Option<usize>,

    /// Cross-thread injection buffer. `add`/`add_to` push here; the owner
    /// drains it into the local deque; thieves may also steal from it.
    pub(crate) inbound: Injector<ActorHandle>,

    /// Remote handle onto the worker's local deque.
    pub(crate) stealer: Stealer<ActorHandle>,

    /// Preferred victim for the next steal sweep. Owner-written locality
    /// heuristic: keep stealing from the last productive source.
    pub(crate) victim: AtomicUsize,

    /// The steal handshake slot: index of the thief currently registered
    /// against this worker, or [`NO_THIEF`]. Written by remote threads via
    /// CAS, hence isolated on its own cache line.
    pub(crate) thief: CachePadded<AtomicUsize>,

    /// Quanta executed by this worker.
    pub(crate) executed: AtomicU64,

    /// Actors this worker obtained by stealing.
    pub(crate) stolen: AtomicU64,

    /// Where this worker sleeps while voting idle.
    pub(crate) parker: Parker,
}

impl WorkerShared {
    pub(crate) fn new(
        index: usize,
        core: Option<usize>,
        stealer: Stealer<ActorHandle>,
        victim_count: usize,
    ) -> Self {
        WorkerShared {
            index,
            core,
            inbound: Injector::new(),
            stealer,
            victim: AtomicUsize::new((index + 1) % victim_count),
            thief: CachePadded::new(AtomicUsize::new(NO_THIEF)),
            executed: AtomicU64::new(0),
            stolen: AtomicU64::new(0),
            parker: Parker::new(),
        }
    }

    /// Whether this worker has work a remote thread could observe or take.
    pub(crate) fn has_visible_work(&self) -> bool {
        !self.stealer.is_empty() || !self.inbound.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Worker loop
// ---------------------------------------------------------------------------

/// The main scheduling loop, one invocation per worker thread.
pub(crate) fn worker_loop(shared: Arc<PoolShared>, index: usize, queue: RunQueue) {
    let me = &shared.workers[index];

    if let Some(core) = me.core {
        if !core_affinity::set_for_current(core_affinity::CoreId { id: core }) {
            tracing::warn!(worker = index, core, "failed to pin worker to core");
        }
    }
    tracing::debug!(worker = index, core = ?me.core, "scheduler worker started");

    loop {
        // Forced shutdown is observed at the top of every iteration;
        // a quantum already in flight is never interrupted.
        if shared.is_finished() {
            break;
        }

        // RUNNING_LOCAL: own queue first, then the inbound buffer.
        if let Some(actor) = queue.pop().or_else(|| queue.refill_from(&me.inbound)) {
            run_quantum(me, &queue, actor);
            continue;
        }

        // STEALING: one full sweep over the other workers.
        if !shared.force_core_distribution {
            if let Some(actor) = steal::steal_sweep(&shared, index) {
                run_quantum(me, &queue, actor);
                continue;
            }
        }

        // VOTING_IDLE: nothing local, nothing stealable.
        match quiesce::vote_idle(&shared, index) {
            Vote::Resume => continue,
            Vote::Terminate => break,
        }
    }

    tracing::debug!(
        worker = me.index,
        executed = me.executed.load(Ordering::Relaxed),
        stolen = me.stolen.load(Ordering::Relaxed),
        "scheduler worker exiting"
    );
}

/// Execute one quantum on `actor` and dispose of the claim according to
/// the outcome.
fn run_quantum(me: &WorkerShared, queue: &RunQueue, actor: ActorHandle) {
    me.executed.fetch_add(1, Ordering::Relaxed);
    match actor.run_batch() {
        RunOutcome::Reschedule => queue.push(actor),
        // Blocked actors come back through `add` when they become
        // runnable; finished actors never come back. Either way the
        // worker's claim ends here.
        RunOutcome::Blocked | RunOutcome::Finished => drop(actor),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
