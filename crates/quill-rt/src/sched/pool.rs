//! The scheduler pool: process-wide state, thread lifecycle, public API.
//!
//! A pool is constructed once (`new`), started once (`start`), and ends
//! with all worker threads joined (`stop` or drop); it is not reusable.
//! Work enters through `add`/`add_to` from any thread, including
//! non-worker threads creating the very first actors.

use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, AtomicU8, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use crossbeam_utils::CachePadded;

use crate::actor::ActorHandle;
use crate::error::SchedError;
use crate::sched::queue::RunQueue;
use crate::sched::quiesce;
use crate::sched::steal;
use crate::sched::worker::{worker_loop, WorkerShared};

// ---------------------------------------------------------------------------
// TerminationKind
// ---------------------------------------------------------------------------

/// How a scheduler run ends.
///
/// Passed to `start` as a hint: under `Quiescent` the workers run the
/// distributed quiescence vote and the pool shuts itself down when no
/// work can ever appear again; under `Forced` the vote is disabled and
/// the pool runs until `terminate`/`stop`. The pool also records which
/// kind actually ended the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationKind {
    /// Normal shutdown on global quiescence.
    Quiescent,
    /// Externally forced or aborted shutdown.
    Forced,
}

const OUTCOME_NONE: u8 = 0;
const OUTCOME_QUIESCENT: u8 = 1;
const OUTCOME_FORCED: u8 = 2;

// ---------------------------------------------------------------------------
// SchedConfig
// ---------------------------------------------------------------------------

/// Pool configuration, fixed for the pool's whole lifetime.
#[derive(Debug, Clone)]
pub struct SchedConfig {
    /// Number of worker threads. Must be at least 1.
    pub workers: u32,
    /// Disable stealing entirely: each worker strictly serves its own
    /// queue. Trades throughput for deterministic per-worker workloads.
    pub force_core_distribution: bool,
    /// Pin each worker to a logical core at startup.
    pub pin_cores: bool,
}

impl Default for SchedConfig {
    fn default() -> Self {
        SchedConfig {
            workers: std::thread::available_parallelism()
                .map(|n| n.get() as u32)
                .unwrap_or(1),
            force_core_distribution: false,
            pin_cores: false,
        }
    }
}

impl SchedConfig {
    /// Default configuration with the worker count overridable via the
    /// `QUILL_WORKERS` environment variable.
    pub fn from_env() -> Self {
        let mut cfg = SchedConfig::default();
        if let Ok(val) = std::env::var("QUILL_WORKERS") {
            match val.parse::<u32>() {
                Ok(n) if n > 0 => cfg.workers = n,
                _ => tracing::warn!(%val, "ignoring invalid QUILL_WORKERS"),
            }
        }
        cfg
    }
}

// ---------------------------------------------------------------------------
// WorkerStats
// ---------------------------------------------------------------------------

/// Per-worker execution counters, for observability and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerStats {
    /// Scheduling quanta executed by this worker.
    pub executed: u64,
    /// Actors this worker obtained by stealing.
    pub stolen: u64,
}

// ---------------------------------------------------------------------------
// PoolShared
// ---------------------------------------------------------------------------

/// State shared between the pool handle and every worker thread.
pub(crate) struct PoolShared {
    /// One record per worker, indexed by worker id.
    pub(crate) workers: Vec<WorkerShared>,

    /// Global idle tally: number of workers currently in the quiescence
    /// vote. Written by every worker, so it gets its own cache line.
    pub(crate) waiting: CachePadded<AtomicU32>,

    /// Work epoch, bumped by every injection and `respond` before the
    /// corresponding push becomes visible. The quiescence commit
    /// revalidates it after sweeping the queues.
    pub(crate) epoch: CachePadded<AtomicU64>,

    /// Pool is shutting down; observed by every worker at the top of its
    /// loop iteration.
    finish: AtomicBool,

    /// How the run ended; first writer wins.
    outcome: AtomicU8,

    /// Whether workers run the quiescence vote (set from the `start` hint).
    detect_quiescence: AtomicBool,

    /// Stealing disabled; workers strictly serve their own queues.
    pub(crate) force_core_distribution: bool,

    /// Round-robin cursor for untargeted `add`.
    next_inject: AtomicUsize,
}

impl PoolShared {
    pub(crate) fn is_finished(&self) -> bool {
        self.finish.load(Ordering::SeqCst)
    }

    pub(crate) fn detect_quiescence(&self) -> bool {
        self.detect_quiescence.load(Ordering::SeqCst)
    }

    pub(crate) fn set_detect_quiescence(&self, on: bool) {
        self.detect_quiescence.store(on, Ordering::SeqCst);
    }

    /// Wake every parked worker.
    pub(crate) fn wake_all(&self) {
        for w in &self.workers {
            w.parker.notify();
        }
    }

    /// Commit termination. Idempotent; the first committer's kind is the
    /// recorded outcome.
    pub(crate) fn commit(&self, kind: TerminationKind) {
        let encoded = match kind {
            TerminationKind::Quiescent => OUTCOME_QUIESCENT,
            TerminationKind::Forced => OUTCOME_FORCED,
        };
        if self
            .outcome
            .compare_exchange(OUTCOME_NONE, encoded, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
        {
            tracing::debug!(?kind, "scheduler pool terminating");
        }
        self.finish.store(true, Ordering::SeqCst);
        self.wake_all();
    }

    /// How the run ended, if it has.
    pub(crate) fn outcome(&self) -> Option<TerminationKind> {
        match self.outcome.load(Ordering::SeqCst) {
            OUTCOME_QUIESCENT => Some(TerminationKind::Quiescent),
            OUTCOME_FORCED => Some(TerminationKind::Forced),
            _ => None,
        }
    }

    /// Place an actor on `worker`'s inbound buffer and void any vote in
    /// progress. The epoch bump must precede the push; see `quiesce`.
    pub(crate) fn inject(&self, worker: usize, actor: ActorHandle) {
        if self.is_finished() {
            tracing::warn!(actor = %actor.id(), "actor injected into terminated pool");
        }
        self.epoch.fetch_add(1, Ordering::SeqCst);
        self.workers[worker].inbound.push(actor);
        self.wake_all();
    }

    fn next_inject_target(&self) -> usize {
        self.next_inject.fetch_add(1, Ordering::Relaxed) % self.workers.len()
    }
}

/// Build the shared pool state plus the owner-side queues that later move
/// into the worker threads.
fn build(config: &SchedConfig) -> Result<(PoolShared, Vec<RunQueue>), SchedError> {
    if config.workers == 0 {
        return Err(SchedError::ZeroWorkers);
    }
    let n = config.workers as usize;

    let core_ids = if config.pin_cores {
        match core_affinity::get_core_ids() {
            Some(ids) if !ids.is_empty() => Some(ids),
            _ => {
                tracing::warn!("core pinning requested but no core ids available");
                None
            }
        }
    } else {
        None
    };

    let mut queues = Vec::with_capacity(n);
    let mut workers = Vec::with_capacity(n);
    for i in 0..n {
        let (queue, stealer) = RunQueue::new();
        let core = core_ids.as_ref().map(|ids| ids[i % ids.len()].id);
        workers.push(WorkerShared::new(i, core, stealer, n));
        queues.push(queue);
    }

    let shared = PoolShared {
        workers,
        waiting: CachePadded::new(AtomicU32::new(0)),
        epoch: CachePadded::new(AtomicU64::new(0)),
        finish: AtomicBool::new(false),
        outcome: AtomicU8::new(OUTCOME_NONE),
        detect_quiescence: AtomicBool::new(false),
        force_core_distribution: config.force_core_distribution,
        next_inject: AtomicUsize::new(0),
    };
    Ok((shared, queues))
}

// ---------------------------------------------------------------------------
// SchedulerPool
// ---------------------------------------------------------------------------

/// The fixed pool of scheduler workers.
///
/// Lifecycle: [`SchedulerPool::new`] -> [`SchedulerPool::start`] ->
/// ([`SchedulerPool::join`] | [`SchedulerPool::stop`]). Dropping the pool
/// forces termination and joins all workers.
pub struct SchedulerPool {
    shared: Arc<PoolShared>,
    /// Owner-side queues, consumed by `start` as threads spawn.
    queues: Vec<Option<RunQueue>>,
    handles: Vec<JoinHandle<()>>,
    started: bool,
}

impl SchedulerPool {
    /// Allocate the worker array. Fails on a zero worker count; no
    /// threads are created yet.
    pub fn new(config: SchedConfig) -> Result<Self, SchedError> {
        let (shared, queues) = build(&config)?;
        Ok(SchedulerPool {
            shared: Arc::new(shared),
            queues: queues.into_iter().map(Some).collect(),
            handles: Vec::new(),
            started: false,
        })
    }

    /// Spawn and (optionally) pin the worker threads.
    ///
    /// With `TerminationKind::Quiescent` the pool shuts itself down once
    /// all workers agree no work can ever appear; with
    /// `TerminationKind::Forced` it runs until `terminate`/`stop`.
    ///
    /// On a thread-spawn failure the pool does not partially start:
    /// already-spawned workers are torn down before the error is returned.
    pub fn start(&mut self, hint: TerminationKind) -> Result<(), SchedError> {
        if self.started {
            return Err(SchedError::AlreadyStarted);
        }
        self.started = true;
        self.shared
            .set_detect_quiescence(hint == TerminationKind::Quiescent);

        tracing::info!(
            workers = self.shared.workers.len(),
            force_core_distribution = self.shared.force_core_distribution,
            ?hint,
            "starting scheduler pool"
        );

        for index in 0..self.shared.workers.len() {
            let queue = self.queues[index]
                .take()
                .expect("worker queue already consumed");
            let shared = Arc::clone(&self.shared);

            let spawned = std::thread::Builder::new()
                .name(format!("quill-worker-{index}"))
                .spawn(move || worker_loop(shared, index, queue));

            match spawned {
                Ok(handle) => self.handles.push(handle),
                Err(source) => {
                    self.shared.commit(TerminationKind::Forced);
                    for handle in self.handles.drain(..) {
                        let _ = handle.join();
                    }
                    return Err(SchedError::ThreadSpawn { index, source });
                }
            }
        }
        Ok(())
    }

    /// Inject a newly runnable actor, round-robin across workers.
    /// Callable from any thread.
    pub fn add(&self, actor: ActorHandle) {
        self.shared
            .inject(self.shared.next_inject_target(), actor);
    }

    /// Inject a runnable actor onto a specific worker's queue (wrapping
    /// on overflow, like the round-robin assignment under forced core
    /// distribution).
    pub fn add_to(&self, worker: usize, actor: ActorHandle) {
        self.shared
            .inject(worker % self.shared.workers.len(), actor);
    }

    /// Notify the pool that new work may exist, revalidating any
    /// in-progress quiescence vote. Callable from any thread.
    pub fn respond(&self) {
        quiesce::respond(&self.shared);
    }

    /// Pull one actor from another worker's queue on behalf of worker
    /// `thief`, using the full victim-selection sweep. Exposed as a
    /// testable primitive; the worker loop calls the same path.
    pub fn worksteal(&self, thief: usize) -> Option<ActorHandle> {
        steal::steal_sweep(&self.shared, thief % self.shared.workers.len())
    }

    /// Number of logical cores (worker threads) the pool is configured
    /// to use.
    pub fn cores(&self) -> u32 {
        self.shared.workers.len() as u32
    }

    /// Force immediate termination regardless of quiescence state.
    /// Workers finish their current quantum, then exit.
    pub fn terminate(&self) {
        self.shared.commit(TerminationKind::Forced);
    }

    /// Wait for the pool to end on its own terms (quiescence under a
    /// `Quiescent` start, `terminate` otherwise) and join all workers.
    /// Returns how the run ended.
    pub fn join(&mut self) -> Option<TerminationKind> {
        for handle in self.handles.drain(..) {
            if handle.join().is_err() {
                tracing::error!("scheduler worker panicked");
            }
        }
        self.shared.outcome()
    }

    /// Request forced shutdown and join all worker threads. Idempotent
    /// after termination.
    pub fn stop(&mut self) -> Option<TerminationKind> {
        self.terminate();
        self.join()
    }

    /// How the run ended, if it has.
    pub fn outcome(&self) -> Option<TerminationKind> {
        self.shared.outcome()
    }

    /// Per-worker execution counters.
    pub fn worker_stats(&self) -> Vec<WorkerStats> {
        self.shared
            .workers
            .iter()
            .map(|w| WorkerStats {
                executed: w.executed.load(Ordering::Relaxed),
                stolen: w.stolen.load(Ordering::Relaxed),
            })
            .collect()
    }

    /// A cloneable injection handle for the actor layer and other
    /// non-worker threads.
    pub fn handle(&self) -> SchedHandle {
        SchedHandle {
            shared: Arc::clone(&self.shared),
        }
    }

    #[cfg(test)]
    pub(crate) fn shared(&self) -> &PoolShared {
        &self.shared
    }
}

impl Drop for SchedulerPool {
    fn drop(&mut self) {
        self.terminate();
        for handle in self.handles.drain(..) {
            let _ = handle.join();
        }
    }
}

impl std::fmt::Debug for SchedulerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchedulerPool")
            .field("workers", &self.shared.workers.len())
            .field("force_core_distribution", &self.shared.force_core_distribution)
            .field("finished", &self.shared.is_finished())
            .field("outcome", &self.shared.outcome())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// SchedHandle
// ---------------------------------------------------------------------------

/// Cloneable handle onto a running pool for injecting work and waking
/// the quiescence vote. Held by the actor layer (message sends that make
/// a blocked actor runnable) and by embedders.
#[derive(Clone)]
pub struct SchedHandle {
    shared: Arc<PoolShared>,
}

impl SchedHandle {
    /// See [`SchedulerPool::add`].
    pub fn add(&self, actor: ActorHandle) {
        self.shared
            .inject(self.shared.next_inject_target(), actor);
    }

    /// See [`SchedulerPool::add_to`].
    pub fn add_to(&self, worker: usize, actor: ActorHandle) {
        self.shared
            .inject(worker % self.shared.workers.len(), actor);
    }

    /// See [`SchedulerPool::respond`].
    pub fn respond(&self) {
        quiesce::respond(&self.shared);
    }

    /// See [`SchedulerPool::cores`].
    pub fn cores(&self) -> u32 {
        self.shared.workers.len() as u32
    }
}

// ---------------------------------------------------------------------------
// Test support
// ---------------------------------------------------------------------------


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::{Actor, RunOutcome};
    use crate::sched::worker::NO_THIEF;
    use std::sync::atomic::{AtomicBool, AtomicU32};
    use std::time::Duration;

    fn cfg(workers: u32) -> SchedConfig {
        SchedConfig {
            workers,
            force_core_distribution: false,
            pin_cores: false,
        }
    }

    /// Spins briefly, bumps a counter, finishes.
    struct Tally {
        executed: Arc<AtomicU64>,
        spin: u32,
    }

    impl Actor for Tally {
        fn run_batch(&self) -> RunOutcome {
            for _ in 0..self.spin {
                std::hint::spin_loop();
            }
            self.executed.fetch_add(1, Ordering::SeqCst);
            RunOutcome::Finished
        }
    }

    fn tally(executed: &Arc<AtomicU64>, spin: u32) -> ActorHandle {
        ActorHandle::new(Arc::new(Tally {
            executed: Arc::clone(executed),
            spin,
        }))
    }

    #[test]
    fn test_zero_workers_rejected() {
        match SchedulerPool::new(cfg(0)) {
            Err(SchedError::ZeroWorkers) => {}
            other => panic!("expected ZeroWorkers, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_double_start_rejected() {
        let mut pool = SchedulerPool::new(cfg(1)).unwrap();
        pool.start(TerminationKind::Quiescent).unwrap();
        assert!(matches!(
            pool.start(TerminationKind::Quiescent),
            Err(SchedError::AlreadyStarted)
        ));
        pool.stop();
    }

    #[test]
    fn test_cores_reports_config() {
        let pool = SchedulerPool::new(cfg(3)).unwrap();
        assert_eq!(pool.cores(), 3);
        assert_eq!(pool.handle().cores(), 3);
    }

    #[test]
    fn test_from_env_override() {
        std::env::set_var("QUILL_WORKERS", "3");
        assert_eq!(SchedConfig::from_env().workers, 3);
        std::env::set_var("QUILL_WORKERS", "bogus");
        assert_eq!(
            SchedConfig::from_env().workers,
            SchedConfig::default().workers
        );
        std::env::remove_var("QUILL_WORKERS");
    }

    #[test]
    fn test_empty_pool_quiesces() {
        // No work is ever injected; the vote must converge on its own.
        let mut pool = SchedulerPool::new(cfg(4)).unwrap();
        pool.start(TerminationKind::Quiescent).unwrap();
        assert_eq!(pool.join(), Some(TerminationKind::Quiescent));
    }

    #[test]
    fn test_single_actor_runs_once_then_quiesces() {
        let executed = Arc::new(AtomicU64::new(0));
        let mut pool = SchedulerPool::new(cfg(1)).unwrap();
        pool.add(tally(&executed, 0));
        pool.start(TerminationKind::Quiescent).unwrap();

        assert_eq!(pool.join(), Some(TerminationKind::Quiescent));
        assert_eq!(executed.load(Ordering::SeqCst), 1);
        // stop after termination is an idempotent no-op.
        assert_eq!(pool.stop(), Some(TerminationKind::Quiescent));
    }

    #[test]
    fn test_steals_redistribute_skewed_load() {
        // 100 actors all injected onto worker 0; stealing spreads them.
        let executed = Arc::new(AtomicU64::new(0));
        let mut pool = SchedulerPool::new(cfg(4)).unwrap();
        for _ in 0..100 {
            pool.add_to(0, tally(&executed, 5_000));
        }
        pool.start(TerminationKind::Quiescent).unwrap();
        assert_eq!(pool.join(), Some(TerminationKind::Quiescent));

        // No lost work, nothing run twice.
        assert_eq!(executed.load(Ordering::SeqCst), 100);
        let stats = pool.worker_stats();
        assert_eq!(stats.iter().map(|s| s.executed).sum::<u64>(), 100);
        // Work-stealing is best-effort; expect at least two workers to
        // have participated.
        let busy = stats.iter().filter(|s| s.executed > 0).count();
        assert!(busy >= 2, "expected load on >= 2 workers, stats {stats:?}");
    }

    #[test]
    fn test_forced_core_distribution_stays_local() {
        let executed = Arc::new(AtomicU64::new(0));
        let config = SchedConfig {
            workers: 4,
            force_core_distribution: true,
            pin_cores: false,
        };
        let mut pool = SchedulerPool::new(config).unwrap();
        for i in 0..4 {
            pool.add_to(i, tally(&executed, 1_000));
        }
        pool.start(TerminationKind::Quiescent).unwrap();
        assert_eq!(pool.join(), Some(TerminationKind::Quiescent));

        assert_eq!(executed.load(Ordering::SeqCst), 4);
        for (i, stats) in pool.worker_stats().iter().enumerate() {
            assert_eq!(stats.executed, 1, "worker {i} ran a foreign actor");
            assert_eq!(stats.stolen, 0, "worker {i} stole despite forced mode");
        }
    }

    #[test]
    fn test_late_injection_voids_vote() {
        // One worker is stuck in a long quantum while the other goes
        // idle; an external thread injects new work mid-vote.
        struct Slow {
            executed: Arc<AtomicU64>,
        }
        impl Actor for Slow {
            fn run_batch(&self) -> RunOutcome {
                std::thread::sleep(Duration::from_millis(50));
                self.executed.fetch_add(1, Ordering::SeqCst);
                RunOutcome::Finished
            }
        }

        let executed = Arc::new(AtomicU64::new(0));
        let mut pool = SchedulerPool::new(cfg(2)).unwrap();
        pool.add(ActorHandle::new(Arc::new(Slow {
            executed: Arc::clone(&executed),
        })));
        pool.start(TerminationKind::Quiescent).unwrap();

        let handle = pool.handle();
        let late = tally(&executed, 0);
        let injector = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(10));
            handle.add(late);
            handle.respond();
        });

        injector.join().unwrap();
        assert_eq!(pool.join(), Some(TerminationKind::Quiescent));
        // Termination waited for both quanta.
        assert_eq!(executed.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_single_ownership_under_stealing_stress() {
        // Reschedule-heavy actors bounce between workers; no actor may
        // ever be mid-quantum on two workers at once.
        struct Stress {
            remaining: AtomicU32,
            running: AtomicU32,
            overlap: Arc<AtomicBool>,
            executed: Arc<AtomicU64>,
        }
        impl Actor for Stress {
            fn run_batch(&self) -> RunOutcome {
                if self.running.fetch_add(1, Ordering::SeqCst) != 0 {
                    self.overlap.store(true, Ordering::SeqCst);
                }
                for _ in 0..500 {
                    std::hint::spin_loop();
                }
                self.executed.fetch_add(1, Ordering::SeqCst);
                self.running.fetch_sub(1, Ordering::SeqCst);
                if self.remaining.fetch_sub(1, Ordering::SeqCst) > 1 {
                    RunOutcome::Reschedule
                } else {
                    RunOutcome::Finished
                }
            }
        }

        let overlap = Arc::new(AtomicBool::new(false));
        let executed = Arc::new(AtomicU64::new(0));
        let mut pool = SchedulerPool::new(cfg(4)).unwrap();
        for _ in 0..50 {
            pool.add_to(
                0,
                ActorHandle::new(Arc::new(Stress {
                    remaining: AtomicU32::new(10),
                    running: AtomicU32::new(0),
                    overlap: Arc::clone(&overlap),
                    executed: Arc::clone(&executed),
                })),
            );
        }
        pool.start(TerminationKind::Quiescent).unwrap();
        assert_eq!(pool.join(), Some(TerminationKind::Quiescent));

        assert!(!overlap.load(Ordering::SeqCst), "actor ran on two workers at once");
        assert_eq!(executed.load(Ordering::SeqCst), 500);
    }

    #[test]
    fn test_worksteal_primitive() {
        let executed = Arc::new(AtomicU64::new(0));
        let pool = SchedulerPool::new(cfg(2)).unwrap();
        pool.add_to(0, tally(&executed, 0));

        let stolen = pool.worksteal(1).expect("worker 0 had stealable work");
        assert!(pool.worksteal(1).is_none());
        assert_eq!(stolen.run_batch(), RunOutcome::Finished);
        assert_eq!(executed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_worksteal_blocked_by_registered_thief() {
        // A held thief slot excludes other stealers.
        let executed = Arc::new(AtomicU64::new(0));
        let pool = SchedulerPool::new(cfg(2)).unwrap();
        pool.add_to(0, tally(&executed, 0));

        pool.shared().workers[0].thief.store(9, Ordering::SeqCst);
        assert!(pool.worksteal(1).is_none());

        pool.shared().workers[0].thief.store(NO_THIEF, Ordering::SeqCst);
        assert!(pool.worksteal(1).is_some());
    }

    #[test]
    fn test_forced_run_stops_on_terminate() {
        let executed = Arc::new(AtomicU64::new(0));
        let mut pool = SchedulerPool::new(cfg(2)).unwrap();
        pool.add(tally(&executed, 0));
        pool.start(TerminationKind::Forced).unwrap();

        // Give the workers time to drain the queue; with a Forced hint
        // they must keep running rather than quiesce.
        std::thread::sleep(Duration::from_millis(50));
        assert_eq!(executed.load(Ordering::SeqCst), 1);
        assert_eq!(pool.outcome(), None);

        assert_eq!(pool.stop(), Some(TerminationKind::Forced));
    }

    #[test]
    fn test_stop_before_start() {
        let mut pool = SchedulerPool::new(cfg(2)).unwrap();
        assert_eq!(pool.stop(), Some(TerminationKind::Forced));
        assert_eq!(pool.stop(), Some(TerminationKind::Forced));
    }

    #[test]
    fn test_drop_joins_workers() {
        let mut pool = SchedulerPool::new(cfg(2)).unwrap();
        pool.start(TerminationKind::Forced).unwrap();
        drop(pool);
        // Reaching this point means drop terminated and joined cleanly.
    }
}
