//! Per-worker run-queue.
//!
//! Each worker owns a FIFO crossbeam deque: the owner pushes requeued
//! actors to the back and pops from the front without synchronization,
//! while remote threads remove from the queue only through the extracted
//! [`Stealer`]. The deque's internal claim step arbitrates the
//! one-element race between the owner's pop and a concurrent steal, so an
//! actor can only ever leave the queue through exactly one of the two.
//!
//! Cross-thread injection (new actors, wakeups from other threads) does
//! not touch the deque directly: it goes through the worker's shared
//! inbound [`Injector`], which the owner drains in batches between pops.
//! FIFO order within one worker is a fairness policy -- actors runnable
//! longest are served first.

use crossbeam_deque::{Injector, Steal, Stealer, Worker};

use crate::actor::ActorHandle;

/// Owner-side handle to one worker's run-queue. Lives on the worker
/// thread; everything cross-thread goes through the paired [`Stealer`]
/// or the inbound injector.
pub(crate) struct RunQueue {
    local: Worker<ActorHandle>,
}

impl RunQueue {
    /// Create a queue plus the stealer handle remote threads will use.
    pub(crate) fn new() -> (RunQueue, Stealer<ActorHandle>) {
        let local = Worker::new_fifo();
        let stealer = local.stealer();
        (RunQueue { local }, stealer)
    }

    /// Append an actor at the tail. Owner-only.
    pub(crate) fn push(&self, actor: ActorHandle) {
        self.local.push(actor);
    }

    /// Remove the actor at the head, if any. Owner-only. An empty queue
    /// is a normal, frequent condition, not an error.
    pub(crate) fn pop(&self) -> Option<ActorHandle> {
        self.local.pop()
    }

    /// Drain a batch of injected actors into the local queue and return
    /// the first one. Owner-only.
    pub(crate) fn refill_from(&self, inbound: &Injector<ActorHandle>) -> Option<ActorHandle> {
        loop {
            match inbound.steal_batch_and_pop(&self.local) {
                Steal::Success(actor) => return Some(actor),
                Steal::Empty => return None,
                Steal::Retry => continue,
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::{Actor, RunOutcome};
    use std::sync::Arc;

    struct Noop;

    impl Actor for Noop {
        fn run_batch(&self) -> RunOutcome {
            RunOutcome::Finished
        }
    }

    fn handle() -> ActorHandle {
        ActorHandle::new(Arc::new(Noop))
    }

    #[test]
    fn test_pop_empty_is_none() {
        let (queue, _stealer) = RunQueue::new();
        assert!(queue.pop().is_none());
    }

    #[test]
    fn test_fifo_order() {
        let (queue, _stealer) = RunQueue::new();
        let (a, b, c) = (handle(), handle(), handle());
        let (ida, idb, idc) = (a.id(), b.id(), c.id());
        queue.push(a);
        queue.push(b);
        queue.push(c);
        assert_eq!(queue.pop().unwrap().id(), ida);
        assert_eq!(queue.pop().unwrap().id(), idb);
        assert_eq!(queue.pop().unwrap().id(), idc);
        assert!(queue.pop().is_none());
    }

    #[test]
    fn test_stealer_sees_pushed_work() {
        let (queue, stealer) = RunQueue::new();
        let a = handle();
        let id = a.id();
        queue.push(a);
        match stealer.steal() {
            Steal::Success(got) => assert_eq!(got.id(), id),
            _ => panic!("expected steal success"),
        }
        assert!(queue.pop().is_none());
    }

    #[test]
    fn test_refill_from_inbound() {
        let (queue, _stealer) = RunQueue::new();
        let inbound = Injector::new();
        let a = handle();
        let id = a.id();
        inbound.push(a);
        inbound.push(handle());

        let first = queue.refill_from(&inbound).expect("inbound had work");
        assert_eq!(first.id(), id);
        // The rest of the batch landed in the local queue.
        assert!(queue.pop().is_some() || !inbound.is_empty());
    }

    #[test]
    fn test_single_element_claimed_once() {
        // One element, owner pop racing a remote steal: exactly one side
        // wins each round.
        use std::sync::atomic::{AtomicU64, Ordering};
        use std::sync::Barrier;

        let rounds = 1000;
        let taken = AtomicU64::new(0);

        for _ in 0..rounds {
            let (queue, stealer) = RunQueue::new();
            queue.push(handle());
            let barrier = Barrier::new(2);

            std::thread::scope(|s| {
                s.spawn(|| {
                    barrier.wait();
                    loop {
                        match stealer.steal() {
                            Steal::Success(_) => {
                                taken.fetch_add(1, Ordering::SeqCst);
                                break;
                            }
                            Steal::Empty => break,
                            Steal::Retry => continue,
                        }
                    }
                });
                barrier.wait();
                if queue.pop().is_some() {
                    taken.fetch_add(1, Ordering::SeqCst);
                }
            });
        }

        assert_eq!(taken.load(Ordering::SeqCst), rounds);
    }
}
