//! Error Types
//!
//! Failures are split by who can cause them:
//!
//! - [`EngineError`]: a manual override aimed at a thread that does not exist
//!   or is not in the state the override needs. State is left untouched.
//! - [`ConfigError`]: settings or thread specs that do not make sense.
//! - [`ScenarioError`]: scenario files that cannot be read, parsed or validated.
//! - [`InvariantViolation`]: the occupancy table disagrees with thread states.
//!   This is a bug in the engine, never a caller mistake.

use crate::domain::thread::{ThreadId, ThreadState};
use std::path::PathBuf;
use thiserror::Error;

/// Rejected manual override
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    /// No thread carries this id
    #[error("thread {thread_id} not found")]
    ThreadNotFound {
        /// Requested id
        thread_id: ThreadId,
    },

    /// Thread exists but the override does not apply to its current state
    #[error("thread {thread_id} is {current}, operation requires {required}")]
    NotEligible {
        /// Requested id
        thread_id: ThreadId,
        /// State the thread is in
        current: ThreadState,
        /// State the operation needs
        required: ThreadState,
    },
}

/// Invalid configuration or thread spec
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// At least one core is required
    #[error("core count must be at least 1")]
    ZeroCores,

    /// Round-robin needs a positive quantum
    #[error("time quantum must be at least 1")]
    ZeroQuantum,

    /// Threads must need at least one tick of execution
    #[error("burst time must be positive{}", thread_suffix(.index))]
    ZeroBurst {
        /// Position of the offending spec in a scenario, if known
        index: Option<usize>,
    },

    /// Algorithm tag did not parse
    #[error("unknown scheduling algorithm `{0}` (expected FCFS, SJF, PRIORITY or RR)")]
    UnknownAlgorithm(String),

    /// No built-in scenario with this name
    #[error("unknown preset `{0}`")]
    UnknownPreset(String),
}

fn thread_suffix(index: &Option<usize>) -> String {
    index.map(|i| format!(" (thread #{i})")).unwrap_or_default()
}

/// Scenario file failure
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// File could not be read or written
    #[error("scenario file {path}: {source}")]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying failure
        #[source]
        source: std::io::Error,
    },

    /// File is not valid scenario JSON
    #[error("scenario JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Parsed, but the contents are not a valid simulation
    #[error("invalid scenario: {0}")]
    Invalid(#[from] ConfigError),
}

/// Occupancy table and thread states disagree
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    /// A core slot points at a thread that is not running on that core
    #[error("core {core} holds {thread_id}, which is {state} on core {thread_core:?}")]
    SlotMismatch {
        /// Core index
        core: usize,
        /// Occupant recorded in the slot
        thread_id: ThreadId,
        /// Occupant's actual state
        state: ThreadState,
        /// Occupant's recorded core
        thread_core: Option<usize>,
    },

    /// A core slot points at an id with no record
    #[error("core {core} holds unknown {thread_id}")]
    UnknownOccupant {
        /// Core index
        core: usize,
        /// Dangling id
        thread_id: ThreadId,
    },

    /// A running thread is not referenced by the slot of its core
    #[error("{thread_id} is RUNNING on core {core:?} but that slot does not hold it")]
    OrphanedRunner {
        /// Running thread
        thread_id: ThreadId,
        /// Core it claims
        core: Option<usize>,
    },

    /// A thread that is not running still claims a core
    #[error("{thread_id} is {state} but still claims core {core}")]
    StaleCore {
        /// Thread
        thread_id: ThreadId,
        /// Its state
        state: ThreadState,
        /// Core it claims
        core: usize,
    },

    /// Remaining time left its `0..=burst` range or a finished thread is not terminated
    #[error("{thread_id} has remaining time {remaining} of burst {burst} in state {state}")]
    RemainingOutOfRange {
        /// Thread
        thread_id: ThreadId,
        /// Remaining units
        remaining: u32,
        /// Burst units
        burst: u32,
        /// Its state
        state: ThreadState,
    },
}
