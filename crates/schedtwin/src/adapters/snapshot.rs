//! Render Snapshots
//!
//! A renderer polls the engine after each tick. [`EngineSnapshot`] is an owned
//! copy of everything it needs (time, config, cores, threads with histories,
//! log, stats) so it can be handed across a task boundary or serialized
//! without holding a borrow of the engine.

use crate::domain::engine::{CoreSlot, SchedulerConfig, SchedulerEngine};
use crate::domain::log::LogEntry;
use crate::domain::stats::SimulationStats;
use crate::domain::thread::{ThreadRecord, ThreadState, Tick};
use serde::{Deserialize, Serialize};

/// Owned, read-only view of an engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    /// Current tick
    pub current_time: Tick,
    /// Active configuration
    pub config: SchedulerConfig,
    /// Per-core slots, indexed by core id
    pub cores: Vec<CoreSlot>,
    /// Thread records in creation order
    pub threads: Vec<ThreadRecord>,
    /// Log entries, most recent first
    pub log: Vec<LogEntry>,
    /// Derived metrics
    pub stats: SimulationStats,
}

impl EngineSnapshot {
    /// Copy the engine's current state
    pub fn capture(engine: &SchedulerEngine) -> Self {
        Self {
            current_time: engine.current_time(),
            config: *engine.config(),
            cores: engine.cores().to_vec(),
            threads: engine.threads().to_vec(),
            log: engine.log().entries().cloned().collect(),
            stats: engine.stats(),
        }
    }

    /// Threads currently in `state`, in creation order
    pub fn in_state(&self, state: ThreadState) -> impl Iterator<Item = &ThreadRecord> {
        self.threads.iter().filter(move |t| t.state() == state)
    }

    /// Serialize as JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
