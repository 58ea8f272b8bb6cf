//! schedtwin - A Deterministic CPU-Scheduling Twin
//!
//! # Overview
//!
//! `schedtwin` simulates how an operating system scheduler shares a set of
//! cores between threads, one abstract tick at a time. It is built for
//! teaching: every run is reproducible, every state change is logged, and
//! every thread keeps the execution intervals a timeline renderer needs.
//!
//! # Layers
//!
//! - **Domain**: the engine itself (threads, policies, tick protocol, log)
//! - **Infrastructure**: scenario files and built-in presets
//! - **Adapters**: owned snapshots for renderers, a shared handle for drivers
//!
//! # Policies
//!
//! | tag        | picks                                         | preempts on          |
//! |------------|-----------------------------------------------|----------------------|
//! | `FCFS`     | earliest arrival, then lowest id              | never                |
//! | `SJF`      | least remaining time, then earliest arrival   | shorter job (opt-in) |
//! | `PRIORITY` | highest priority, then earliest arrival       | higher prio (opt-in) |
//! | `RR`       | oldest ready-queue entry                      | quantum expiry       |
//!
//! # Usage
//!
//! ```rust
//! use schedtwin::{Algorithm, SchedulerConfig, SchedulerEngine, ThreadSpec, ThreadState};
//!
//! let mut engine = SchedulerEngine::new(SchedulerConfig::new(Algorithm::RoundRobin, 1, false, 3));
//! let t1 = engine.create_thread(ThreadSpec::new(7, 0, 0));
//!
//! engine.run_until_idle(100);
//!
//! let record = engine.thread(t1).unwrap();
//! assert_eq!(record.state(), ThreadState::Terminated);
//! assert_eq!(record.executed_ticks(), 7);
//! for line in engine.logs().iter().rev() {
//!     println!("{line}");
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod error;
pub mod infrastructure;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Re-export Primary Types
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub use domain::{
    Algorithm,
    CoreEvent,
    CoreSlot,
    EventLog,
    Interval,
    LogEntry,
    SchedulerConfig,
    SchedulerEngine,
    SimulationStats,
    ThreadId,
    ThreadRecord,
    ThreadSpec,
    ThreadState,
    Tick,
    TickReport,
    DEFAULT_MAX_TICKS,
};

pub use adapters::{EngineSnapshot, SharedEngine};
pub use error::{ConfigError, EngineError, InvariantViolation, ScenarioError};
pub use infrastructure::Scenario;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
