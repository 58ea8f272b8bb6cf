//! ThreadRecord - One Simulated Thread
//!
//! # Ownership
//!
//! Records are created and mutated only by
//! [`SchedulerEngine`](crate::domain::engine::SchedulerEngine). Every
//! mutator here is `pub(crate)`; callers outside the crate get `&ThreadRecord`
//! and read it through accessors.

use super::types::{Interval, ThreadId, ThreadState, Tick};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Creation input for a thread
///
/// # Example
///
/// ```rust
/// use schedtwin::domain::thread::ThreadSpec;
///
/// let spec = ThreadSpec::new(5, 2, 0);
/// assert!(spec.validate().is_ok());
/// assert!(ThreadSpec::new(0, 2, 0).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadSpec {
    /// Total execution units required
    pub burst_time: u32,
    /// Larger is more urgent
    #[serde(default)]
    pub priority: i32,
    /// Tick at which the thread becomes eligible for admission
    #[serde(default)]
    pub arrival_time: Tick,
}

impl ThreadSpec {
    /// Create a spec
    pub const fn new(burst_time: u32, priority: i32, arrival_time: Tick) -> Self {
        Self {
            burst_time,
            priority,
            arrival_time,
        }
    }

    /// Reject a zero burst time
    ///
    /// Arrival is unsigned, so a negative arrival cannot be expressed at all.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.burst_time == 0 {
            return Err(ConfigError::ZeroBurst { index: None });
        }
        Ok(())
    }
}

/// Identity plus runtime fields of one simulated thread
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadRecord {
    id: ThreadId,
    burst_time: u32,
    remaining_time: u32,
    priority: i32,
    arrival_time: Tick,
    state: ThreadState,
    core_id: Option<usize>,
    queue_sequence: u64,
    waiting_time: Option<Tick>,
    turnaround_time: Option<Tick>,
    history: Vec<Interval>,
}

impl ThreadRecord {
    /// Build a fresh record in `NEW`
    pub(crate) fn new(id: ThreadId, spec: ThreadSpec) -> Self {
        Self {
            id,
            burst_time: spec.burst_time,
            remaining_time: spec.burst_time,
            priority: spec.priority,
            arrival_time: spec.arrival_time,
            state: ThreadState::New,
            core_id: None,
            queue_sequence: 0,
            waiting_time: None,
            turnaround_time: None,
            history: Vec::new(),
        }
    }

    /// Thread identifier
    #[inline(always)]
    pub fn id(&self) -> ThreadId {
        self.id
    }

    /// Total execution units required
    #[inline(always)]
    pub fn burst_time(&self) -> u32 {
        self.burst_time
    }

    /// Execution units left
    #[inline(always)]
    pub fn remaining_time(&self) -> u32 {
        self.remaining_time
    }

    /// Priority (larger is more urgent)
    #[inline(always)]
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Arrival tick
    #[inline(always)]
    pub fn arrival_time(&self) -> Tick {
        self.arrival_time
    }

    /// Current lifecycle state
    #[inline(always)]
    pub fn state(&self) -> ThreadState {
        self.state
    }

    /// Core executing this thread, `None` unless `RUNNING`
    #[inline(always)]
    pub fn core_id(&self) -> Option<usize> {
        self.core_id
    }

    /// Stamp taken on the most recent entry into `READY`
    #[inline(always)]
    pub fn queue_sequence(&self) -> u64 {
        self.queue_sequence
    }

    /// Turnaround minus burst; set at termination
    #[inline(always)]
    pub fn waiting_time(&self) -> Option<Tick> {
        self.waiting_time
    }

    /// Ticks from arrival to termination; set at termination
    #[inline(always)]
    pub fn turnaround_time(&self) -> Option<Tick> {
        self.turnaround_time
    }

    /// Execution intervals, ordered and non-overlapping
    pub fn history(&self) -> &[Interval] {
        &self.history
    }

    /// Total ticks spent on a core
    pub fn executed_ticks(&self) -> Tick {
        self.history.iter().map(Interval::len).sum()
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // Engine-side mutators
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    fn transition(&mut self, next: ThreadState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "illegal transition {} -> {} for {}",
            self.state,
            next,
            self.id
        );
        self.state = next;
    }

    /// Enter `READY` (admission, demotion or unblock) with a fresh stamp
    pub(crate) fn make_ready(&mut self, sequence: u64) {
        self.transition(ThreadState::Ready);
        self.core_id = None;
        self.queue_sequence = sequence;
    }

    /// Occupy `core`
    pub(crate) fn dispatch(&mut self, core: usize) {
        self.transition(ThreadState::Running);
        self.core_id = Some(core);
    }

    /// Leave the core for simulated I/O
    pub(crate) fn block(&mut self) {
        self.transition(ThreadState::Blocked);
        self.core_id = None;
    }

    /// Account one tick of execution ending at `now`
    ///
    /// Extends the last interval when it is contiguous (`end == now - 1`) and
    /// of the same state, otherwise appends `[now - 1, now)`.
    pub(crate) fn run_one_tick(&mut self, now: Tick) {
        debug_assert!(self.state.is_running());
        let start = now.saturating_sub(1);
        match self.history.last_mut() {
            Some(last) if last.end == start && last.state == self.state => last.end = now,
            _ => self.history.push(Interval {
                start,
                end: now,
                state: self.state,
            }),
        }
        self.remaining_time = self.remaining_time.saturating_sub(1);
    }

    /// Terminate at `now`, fixing turnaround and waiting time
    pub(crate) fn terminate(&mut self, now: Tick) {
        self.transition(ThreadState::Terminated);
        self.core_id = None;
        let turnaround = now.saturating_sub(self.arrival_time);
        self.turnaround_time = Some(turnaround);
        self.waiting_time = Some(turnaround.saturating_sub(Tick::from(self.burst_time)));
    }
}
