//! Distributed quiescence detection.
//!
//! Workers that find nothing to run and nothing to steal enter the vote:
//! they snapshot the pool's work epoch, raise the global idle tally, and
//! park. The vote is two-phase. Reaching tally == N (all workers idle
//! simultaneously) is only the first phase; the worker that observes it
//! runs a confirmation sweep -- every queue empty, tally still N, epoch
//! unchanged -- before committing termination. The sweep is what makes a
//! transient false-empty observation harmless: any injection bumps the
//! epoch *before* its push becomes visible, so a commit that revalidates
//! the epoch after scanning the queues cannot race with it.
//!
//! `respond` is the other half of the protocol: called whenever new work
//! may exist, it bumps the epoch and wakes every parked worker, voiding
//! any vote in progress.

use std::sync::atomic::Ordering;

use crate::sched::pool::PoolShared;
use crate::sched::worker::PARK_TIMEOUT;
use crate::sched::TerminationKind;

/// What the vote told an idle worker to do.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Vote {
    /// Work may exist again; go back to running/stealing.
    Resume,
    /// The pool is done (quiescent or forced); exit the loop.
    Terminate,
}

/// Called by a worker whose queue is empty and whose steal sweep came up
/// dry. Blocks (parking with a timeout) until work may exist again or the
/// pool terminates. This is the only place a worker ever sleeps.
pub(crate) fn vote_idle(shared: &PoolShared, index: usize) -> Vote {
    let epoch = shared.epoch.load(Ordering::SeqCst);
    shared.waiting.fetch_add(1, Ordering::SeqCst);
    let me = &shared.workers[index];

    loop {
        if shared.is_finished() {
            shared.waiting.fetch_sub(1, Ordering::SeqCst);
            return Vote::Terminate;
        }

        if shared.epoch.load(Ordering::SeqCst) != epoch || work_discoverable(shared, index) {
            shared.waiting.fetch_sub(1, Ordering::SeqCst);
            return Vote::Resume;
        }

        if shared.detect_quiescence()
            && shared.waiting.load(Ordering::SeqCst) == shared.workers.len() as u32
            && confirm_quiescent(shared, epoch)
        {
            shared.commit(TerminationKind::Quiescent);
            shared.waiting.fetch_sub(1, Ordering::SeqCst);
            return Vote::Terminate;
        }

        me.parker.park(PARK_TIMEOUT);
    }
}

/// Whether this idle worker could obtain work right now: its own inbound
/// buffer, or -- when stealing is enabled -- any sibling's queue.
fn work_discoverable(shared: &PoolShared, index: usize) -> bool {
    if !shared.workers[index].inbound.is_empty() {
        return true;
    }
    if shared.force_core_distribution {
        return false;
    }
    shared
        .workers
        .iter()
        .enumerate()
        .any(|(i, w)| i != index && w.has_visible_work())
}

/// The confirmation sweep. Must hold in full *after* the tally reached N:
/// every queue empty, everyone still idle, and no injection happened since
/// the committing worker went idle.
fn confirm_quiescent(shared: &PoolShared, epoch: u64) -> bool {
    if shared.workers.iter().any(|w| w.has_visible_work()) {
        return false;
    }
    // Order matters: the queue scan above must complete before these
    // re-reads, so an injection that the scan missed is caught by its
    // earlier epoch bump.
    shared.waiting.load(Ordering::SeqCst) == shared.workers.len() as u32
        && shared.epoch.load(Ordering::SeqCst) == epoch
}

/// Notify the pool that new work may exist, voiding any in-progress vote.
/// Callable from any thread.
pub(crate) fn respond(shared: &PoolShared) {
    shared.epoch.fetch_add(1, Ordering::SeqCst);
    shared.wake_all();
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
