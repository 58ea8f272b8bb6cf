//! Simulation Statistics
//!
//! Derived, read-only numbers over an engine's current state. Nothing here is
//! stored between ticks except the per-core busy counters, which live in
//! [`CoreSlot`](crate::domain::engine::CoreSlot).

use crate::domain::engine::SchedulerEngine;
use crate::domain::thread::{ThreadState, Tick};
use serde::{Deserialize, Serialize};

/// Thread counts per lifecycle state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateCounts {
    /// `NEW`
    pub new: usize,
    /// `READY`
    pub ready: usize,
    /// `RUNNING`
    pub running: usize,
    /// `BLOCKED`
    pub blocked: usize,
    /// `TERMINATED`
    pub terminated: usize,
}

impl StateCounts {
    fn add(&mut self, state: ThreadState) {
        match state {
            ThreadState::New => self.new += 1,
            ThreadState::Ready => self.ready += 1,
            ThreadState::Running => self.running += 1,
            ThreadState::Blocked => self.blocked += 1,
            ThreadState::Terminated => self.terminated += 1,
        }
    }

    /// Sum over all states
    pub fn total(&self) -> usize {
        self.new + self.ready + self.running + self.blocked + self.terminated
    }
}

/// Aggregate metrics for one simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationStats {
    /// Tick the numbers were taken at
    pub current_time: Tick,
    /// Threads per state
    pub counts: StateCounts,
    /// Mean waiting time over terminated threads
    pub average_waiting_time: Option<f64>,
    /// Mean turnaround time over terminated threads
    pub average_turnaround_time: Option<f64>,
    /// Busy ticks per core, indexed by core id
    pub core_busy_ticks: Vec<Tick>,
    /// Busy ticks over `cores × current_time`, in `0.0..=1.0`
    pub utilization: f64,
}

impl SimulationStats {
    /// Take the numbers from `engine`
    pub fn collect(engine: &SchedulerEngine) -> Self {
        let mut counts = StateCounts::default();
        let mut waiting_sum: Tick = 0;
        let mut turnaround_sum: Tick = 0;

        for thread in engine.threads() {
            counts.add(thread.state());
            if let (Some(waiting), Some(turnaround)) =
                (thread.waiting_time(), thread.turnaround_time())
            {
                waiting_sum += waiting;
                turnaround_sum += turnaround;
            }
        }

        let finished = counts.terminated as f64;
        let average = |sum: Tick| (counts.terminated > 0).then(|| sum as f64 / finished);
        let average_waiting_time = average(waiting_sum);
        let average_turnaround_time = average(turnaround_sum);

        let core_busy_ticks: Vec<Tick> = engine.cores().iter().map(|c| c.busy_ticks).collect();
        let capacity = core_busy_ticks.len() as f64 * engine.current_time() as f64;
        let busy: Tick = core_busy_ticks.iter().sum();
        let utilization = if capacity > 0.0 {
            (busy as f64 / capacity).min(1.0)
        } else {
            0.0
        };

        Self {
            current_time: engine.current_time(),
            counts,
            average_waiting_time,
            average_turnaround_time,
            core_busy_ticks,
            utilization,
        }
    }
}
