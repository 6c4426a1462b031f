//! The thief/victim steal handshake.
//!
//! A steal is cooperative, not purely lock-free: before touching a
//! victim's queue, the thief registers itself in the victim's `thief` slot
//! with a CAS from [`NO_THIEF`]. A failed CAS means another thief is
//! mid-steal against that victim, and the attempt fails immediately --
//! at most one thief works a given victim at a time. Under the claim, the
//! thief takes one actor from the victim's deque (the deque's own atomic
//! claim step arbitrates against the victim's concurrent local pop), then
//! falls back to the victim's inbound buffer. The slot is released
//! unconditionally afterwards.

use crossbeam_deque::Steal;
use crossbeam_utils::Backoff;

use std::sync::atomic::Ordering;

use crate::actor::ActorHandle;
use crate::sched::pool::PoolShared;
use crate::sched::worker::{WorkerShared, NO_THIEF};

/// Result of one steal attempt against one victim.
pub(crate) enum StealOutcome {
    /// One actor was removed from the victim's queue.
    Taken(ActorHandle),
    /// Another thief holds the victim's thief slot.
    Busy,
    /// The slot was claimed but the victim had nothing to take.
    Empty,
}

/// Attempt to steal one actor from `victim` on behalf of worker `thief`.
///
/// This is the whole handshake: claim the slot, take from the tail,
/// release the slot.
pub(crate) fn steal_one(thief: usize, victim: &WorkerShared) -> StealOutcome {
    if victim
        .thief
        .compare_exchange(NO_THIEF, thief, Ordering::SeqCst, Ordering::SeqCst)
        .is_err()
    {
        return StealOutcome::Busy;
    }

    let outcome = take_one(victim);
    victim.thief.store(NO_THIEF, Ordering::SeqCst);
    outcome
}

/// Take one actor from the victim's deque, falling back to its inbound
/// buffer. Caller must hold the victim's thief slot.
fn take_one(victim: &WorkerShared) -> StealOutcome {
    let backoff = Backoff::new();
    loop {
        match victim.stealer.steal() {
            Steal::Success(actor) => return StealOutcome::Taken(actor),
            Steal::Empty => break,
            Steal::Retry => backoff.spin(),
        }
    }
    loop {
        match victim.inbound.steal() {
            Steal::Success(actor) => return StealOutcome::Taken(actor),
            Steal::Empty => return StealOutcome::Empty,
            Steal::Retry => backoff.spin(),
        }
    }
}

/// One full sweep over the other workers, starting at the thief's current
/// victim and advancing round-robin. On success the source becomes the
/// thief's next preferred victim (productive sources tend to stay
/// productive); a busy victim just counts as a failed attempt.
pub(crate) fn steal_sweep(shared: &PoolShared, thief: usize) -> Option<ActorHandle> {
    let n = shared.workers.len();
    if n < 2 {
        return None;
    }

    let me = &shared.workers[thief];
    let mut candidate = me.victim.load(Ordering::Relaxed) % n;
    if candidate == thief {
        candidate = (candidate + 1) % n;
    }

    for _ in 0..n - 1 {
        if let StealOutcome::Taken(actor) = steal_one(thief, &shared.workers[candidate]) {
            me.victim.store(candidate, Ordering::Relaxed);
            me.stolen.fetch_add(1, Ordering::Relaxed);
            return Some(actor);
        }
        candidate = (candidate + 1) % n;
        if candidate == thief {
            candidate = (candidate + 1) % n;
        }
    }

    None
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
