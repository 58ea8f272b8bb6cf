//! SchedulerEngine - The Tick-Driven Scheduling Twin
//!
//! # Architecture
//!
//! ```text
//! SchedulerEngine
//!   ├─ config: SchedulerConfig      (algorithm, cores, preemption, quantum)
//!   ├─ threads: Vec<ThreadRecord>   (creation order; T<n> at index n-1)
//!   ├─ cores: Vec<CoreSlot>         (occupant + quantum + busy ticks per core)
//!   ├─ current_time: Tick
//!   ├─ next_sequence: u64           (global READY stamp generator)
//!   └─ log: EventLog                (newest first)
//! ```
//!
//! # Tick Protocol
//!
//! One call to [`SchedulerEngine::tick`] runs to completion before returning:
//!
//! 1. Advance the clock.
//! 2. Admit every `NEW` thread whose arrival tick has come (creation order).
//! 3. For each core, in index order:
//!    - execute one unit on its occupant (history, remaining time, quantum);
//!    - release the occupant on the first matching condition: termination,
//!      quantum expiry (RR), ranking preemption (SJF/PRIORITY, preemptive);
//!    - if the core is free, dispatch the system-wide best ready thread.
//!
//! The fixed core order and release-before-dispatch rule make every trace
//! reproducible. A thread released on one core may be dispatched again in the
//! same tick, on this core or a later one.
//!
//! # Exclusivity
//!
//! Every mutating operation takes `&mut self`. Sharing one engine between
//! driver tasks goes through [`SharedEngine`](crate::adapters::SharedEngine).

use super::config::SchedulerConfig;
use super::cores::CoreSlot;
use crate::domain::log::EventLog;
use crate::domain::policy::{select_next, should_preempt};
use crate::domain::stats::SimulationStats;
use crate::domain::thread::{ThreadId, ThreadRecord, ThreadSpec, ThreadState, Tick};
use crate::error::{EngineError, InvariantViolation};
use serde::{Deserialize, Serialize};

/// Upper bound used by drivers that run "until idle" without their own limit
pub const DEFAULT_MAX_TICKS: Tick = 100_000;

/// Something that happened on one core during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CoreEvent {
    /// Occupant finished its burst
    Terminated {
        /// Core index
        core: usize,
        /// Finished thread
        thread: ThreadId,
    },
    /// Occupant used up its round-robin quantum
    QuantumExpired {
        /// Core index
        core: usize,
        /// Demoted thread
        thread: ThreadId,
    },
    /// Occupant was displaced by a better-ranked ready thread
    Preempted {
        /// Core index
        core: usize,
        /// Demoted thread
        thread: ThreadId,
        /// Candidate that triggered the preemption
        by: ThreadId,
    },
    /// A ready thread was placed on the core
    Dispatched {
        /// Core index
        core: usize,
        /// Dispatched thread
        thread: ThreadId,
    },
}

/// Outcome of one [`SchedulerEngine::tick`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    /// Tick that was just simulated
    pub tick: Tick,
    /// Threads admitted from `NEW` this tick, in creation order
    pub admitted: Vec<ThreadId>,
    /// Per-core events, in the order they happened
    pub events: Vec<CoreEvent>,
}

impl TickReport {
    fn new(tick: Tick) -> Self {
        Self {
            tick,
            ..Self::default()
        }
    }

    /// Threads dispatched this tick
    pub fn dispatched(&self) -> impl Iterator<Item = ThreadId> + '_ {
        self.events.iter().filter_map(|e| match e {
            CoreEvent::Dispatched { thread, .. } => Some(*thread),
            _ => None,
        })
    }

    /// Threads that terminated this tick
    pub fn terminated(&self) -> impl Iterator<Item = ThreadId> + '_ {
        self.events.iter().filter_map(|e| match e {
            CoreEvent::Terminated { thread, .. } => Some(*thread),
            _ => None,
        })
    }
}

/// Discrete-time multi-core scheduler
///
/// # Example
///
/// ```rust
/// use schedtwin::domain::engine::{SchedulerConfig, SchedulerEngine};
/// use schedtwin::domain::policy::Algorithm;
/// use schedtwin::domain::thread::{ThreadSpec, ThreadState};
///
/// let mut engine = SchedulerEngine::new(SchedulerConfig::new(Algorithm::Fcfs, 1, false, 3));
/// let t1 = engine.create_thread(ThreadSpec::new(2, 0, 0));
///
/// engine.tick(); // admit + dispatch
/// engine.tick(); // run 1
/// engine.tick(); // run 2, terminate
///
/// let record = engine.thread(t1).unwrap();
/// assert_eq!(record.state(), ThreadState::Terminated);
/// assert_eq!(record.turnaround_time(), Some(3));
/// assert_eq!(record.waiting_time(), Some(1));
/// ```
#[derive(Debug, Clone)]
pub struct SchedulerEngine {
    config: SchedulerConfig,
    threads: Vec<ThreadRecord>,
    cores: Vec<CoreSlot>,
    current_time: Tick,
    next_sequence: u64,
    log: EventLog,
}

impl Default for SchedulerEngine {
    fn default() -> Self {
        Self::new(SchedulerConfig::default())
    }
}

impl SchedulerEngine {
    /// Create an empty engine
    ///
    /// `config` is trusted; run [`SchedulerConfig::validate`] on untrusted
    /// input first.
    pub fn new(config: SchedulerConfig) -> Self {
        Self {
            config,
            threads: Vec::new(),
            cores: vec![CoreSlot::IDLE; config.core_count],
            current_time: 0,
            next_sequence: 0,
            log: EventLog::new(),
        }
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // Queries
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// Active configuration
    #[inline(always)]
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Current tick
    #[inline(always)]
    pub fn current_time(&self) -> Tick {
        self.current_time
    }

    /// All thread records, in creation order
    pub fn threads(&self) -> &[ThreadRecord] {
        &self.threads
    }

    /// One thread record
    pub fn thread(&self, id: ThreadId) -> Option<&ThreadRecord> {
        self.position(id).map(|idx| &self.threads[idx])
    }

    /// Per-core slots, indexed by core id
    pub fn cores(&self) -> &[CoreSlot] {
        &self.cores
    }

    /// The event log
    pub fn log(&self) -> &EventLog {
        &self.log
    }

    /// Formatted log lines, most recent first
    pub fn logs(&self) -> Vec<String> {
        self.log.lines()
    }

    /// Aggregate metrics over the current records
    pub fn stats(&self) -> SimulationStats {
        SimulationStats::collect(self)
    }

    /// `true` when no thread can make further progress
    ///
    /// Threads that are `BLOCKED` only move again through [`Self::unblock`],
    /// so a run whose unfinished threads are all blocked is idle.
    pub fn is_idle(&self) -> bool {
        !self.threads.iter().any(|t| {
            matches!(
                t.state(),
                ThreadState::New | ThreadState::Ready | ThreadState::Running
            )
        })
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // Operations
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    /// Add a thread in `NEW`
    ///
    /// `spec` is trusted; the engine does not re-check the burst time.
    pub fn create_thread(&mut self, spec: ThreadSpec) -> ThreadId {
        let id = ThreadId::new(self.threads.len() as u32 + 1);
        self.threads.push(ThreadRecord::new(id, spec));
        self.emit(format!(
            "Thread {id} Created (Burst: {}, Prio: {}, Arr: {})",
            spec.burst_time, spec.priority, spec.arrival_time
        ));
        id
    }

    /// Replace the policy settings
    ///
    /// Shrinking the core count demotes every thread running on a removed
    /// core back to `READY` before the table is cut. Growing appends idle
    /// cores. Retained cores keep their quantum counters.
    pub fn update_config(&mut self, config: SchedulerConfig) {
        let old_count = self.cores.len();
        let new_count = config.core_count;

        if new_count < old_count {
            for core in new_count..old_count {
                let Some(tid) = self.cores[core].occupant else {
                    continue;
                };
                if let Some(idx) = self.position(tid) {
                    self.demote(core, idx);
                } else {
                    self.cores[core].release();
                }
                self.emit(format!("CPU {core} Removed. {tid} -> Ready"));
            }
            self.cores.truncate(new_count);
        } else {
            self.cores.resize(new_count, CoreSlot::IDLE);
        }

        self.config = config;
        tracing::info!(
            algorithm = %config.algorithm,
            cores = config.core_count,
            preemptive = config.preemptive,
            quantum = config.quantum,
            "scheduler reconfigured"
        );
        self.debug_check();
    }

    /// Advance the simulation by one tick
    pub fn tick(&mut self) -> TickReport {
        self.current_time += 1;
        let now = self.current_time;
        let mut report = TickReport::new(now);

        for thread in self
            .threads
            .iter_mut()
            .filter(|t| t.state() == ThreadState::New && t.arrival_time() <= now)
        {
            thread.make_ready(self.next_sequence);
            self.next_sequence += 1;
            report.admitted.push(thread.id());
        }

        for core in 0..self.cores.len() {
            if let Some(tid) = self.cores[core].occupant {
                self.execute(core, tid, &mut report);
            }
            if self.cores[core].is_idle() {
                self.dispatch(core, &mut report);
            }
        }

        self.debug_check();
        report
    }

    /// Tick until [`Self::is_idle`] or `max_ticks` ticks have run
    ///
    /// Returns the number of ticks executed.
    pub fn run_until_idle(&mut self, max_ticks: Tick) -> Tick {
        let mut count = 0;
        while count < max_ticks && !self.is_idle() {
            self.tick();
            count += 1;
        }
        count
    }

    /// Move a running thread to `BLOCKED` (simulated I/O wait)
    ///
    /// # Errors
    ///
    /// - `ThreadNotFound`: no thread has this id
    /// - `NotEligible`: the thread is not `RUNNING`
    ///
    /// On error nothing changes, not even the log.
    pub fn force_block(&mut self, id: ThreadId) -> Result<(), EngineError> {
        let idx = self.locate(id)?;
        let thread = &self.threads[idx];
        if !thread.state().is_running() {
            return Err(reject(EngineError::NotEligible {
                thread_id: id,
                current: thread.state(),
                required: ThreadState::Running,
            }));
        }

        let core = thread.core_id();
        self.threads[idx].block();
        if let Some(core) = core {
            self.cores[core].release();
        }
        self.emit(format!("Thread {id} Blocked (Manual I/O)"));
        self.debug_check();
        Ok(())
    }

    /// Return a blocked thread to `READY` with a fresh queue stamp
    ///
    /// # Errors
    ///
    /// - `ThreadNotFound`: no thread has this id
    /// - `NotEligible`: the thread is not `BLOCKED`
    pub fn unblock(&mut self, id: ThreadId) -> Result<(), EngineError> {
        let idx = self.locate(id)?;
        let state = self.threads[idx].state();
        if !state.is_blocked() {
            return Err(reject(EngineError::NotEligible {
                thread_id: id,
                current: state,
                required: ThreadState::Blocked,
            }));
        }

        let sequence = self.fresh_sequence();
        self.threads[idx].make_ready(sequence);
        self.emit(format!("Thread {id} Unblocked -> Ready"));
        Ok(())
    }

    /// Discard every thread and all runtime state, keeping the configuration
    pub fn reset(&mut self) {
        self.threads.clear();
        self.cores = vec![CoreSlot::IDLE; self.config.core_count];
        self.current_time = 0;
        self.next_sequence = 0;
        self.log.clear();
        tracing::info!("scheduler reset");
    }

    /// Cross-check the occupancy table against thread states
    ///
    /// Holds after every public operation. A failure is an engine bug.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        for (core, slot) in self.cores.iter().enumerate() {
            let Some(tid) = slot.occupant else {
                continue;
            };
            let thread = self
                .thread(tid)
                .ok_or(InvariantViolation::UnknownOccupant {
                    core,
                    thread_id: tid,
                })?;
            if !thread.state().is_running() || thread.core_id() != Some(core) {
                return Err(InvariantViolation::SlotMismatch {
                    core,
                    thread_id: tid,
                    state: thread.state(),
                    thread_core: thread.core_id(),
                });
            }
        }

        for thread in &self.threads {
            let id = thread.id();
            match (thread.state(), thread.core_id()) {
                (ThreadState::Running, core) => {
                    let held = core
                        .and_then(|c| self.cores.get(c))
                        .is_some_and(|slot| slot.occupant == Some(id));
                    if !held {
                        return Err(InvariantViolation::OrphanedRunner {
                            thread_id: id,
                            core,
                        });
                    }
                }
                (state, Some(core)) => {
                    return Err(InvariantViolation::StaleCore {
                        thread_id: id,
                        state,
                        core,
                    });
                }
                (_, None) => {}
            }

            let finished = thread.remaining_time() == 0;
            let in_range = thread.remaining_time() <= thread.burst_time();
            if !in_range || finished != thread.state().is_terminated() {
                return Err(InvariantViolation::RemainingOutOfRange {
                    thread_id: id,
                    remaining: thread.remaining_time(),
                    burst: thread.burst_time(),
                    state: thread.state(),
                });
            }
        }

        Ok(())
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // Tick internals
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// Run one unit on `core`'s occupant and apply the first release rule
    fn execute(&mut self, core: usize, tid: ThreadId, report: &mut TickReport) {
        let now = self.current_time;
        let Some(idx) = self.position(tid) else {
            debug_assert!(false, "core {core} holds unknown {tid}");
            self.cores[core].release();
            return;
        };

        self.threads[idx].run_one_tick(now);
        self.cores[core].account_tick();

        if self.threads[idx].remaining_time() == 0 {
            self.threads[idx].terminate(now);
            self.cores[core].release();
            self.emit(format!("CPU {core}: {tid} Terminated"));
            report.events.push(CoreEvent::Terminated { core, thread: tid });
            return;
        }

        let quantum_spent = self.cores[core].quantum_used >= self.config.quantum;
        if self.config.algorithm.uses_quantum() && quantum_spent {
            self.demote(core, idx);
            self.emit(format!("CPU {core}: {tid} Quantum Expired"));
            report.events.push(CoreEvent::QuantumExpired { core, thread: tid });
            return;
        }

        if self.config.ranking_preemption() {
            let Some(candidate) = self.best_ready() else {
                return;
            };
            if should_preempt(self.config.algorithm, &self.threads[idx], &self.threads[candidate]) {
                let by = self.threads[candidate].id();
                self.demote(core, idx);
                self.emit(format!("CPU {core}: {tid} Preempted by {by}"));
                report.events.push(CoreEvent::Preempted {
                    core,
                    thread: tid,
                    by,
                });
            }
        }
    }

    /// Place the best ready thread on an idle `core`
    fn dispatch(&mut self, core: usize, report: &mut TickReport) {
        let Some(idx) = self.best_ready() else {
            return;
        };
        let id = self.threads[idx].id();
        self.threads[idx].dispatch(core);
        self.cores[core].occupy(id);
        self.emit(format!("CPU {core}: Dispatched {id} ({})", self.config.algorithm));
        report.events.push(CoreEvent::Dispatched { core, thread: id });
    }

    /// Running thread at `idx` goes back to `READY` and `core` is freed
    fn demote(&mut self, core: usize, idx: usize) {
        let sequence = self.fresh_sequence();
        self.threads[idx].make_ready(sequence);
        self.cores[core].release();
    }

    /// Index of the policy's best `READY` thread
    fn best_ready(&self) -> Option<usize> {
        let ready = self.threads.iter().filter(|t| t.state().is_ready());
        select_next(self.config.algorithm, ready).and_then(|t| self.position(t.id()))
    }

    #[inline]
    fn fresh_sequence(&mut self) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        sequence
    }

    #[inline]
    fn position(&self, id: ThreadId) -> Option<usize> {
        id.index().filter(|&idx| idx < self.threads.len())
    }

    fn locate(&self, id: ThreadId) -> Result<usize, EngineError> {
        self.position(id)
            .ok_or_else(|| reject(EngineError::ThreadNotFound { thread_id: id }))
    }

    fn emit(&mut self, message: String) {
        self.log.push(self.current_time, message);
    }

    #[inline]
    fn debug_check(&self) {
        if cfg!(debug_assertions) {
            if let Err(violation) = self.check_invariants() {
                panic!("scheduler invariant violated: {violation}");
            }
        }
    }
}

fn reject(err: EngineError) -> EngineError {
    tracing::warn!(error = %err, "manual override rejected");
    err
}
