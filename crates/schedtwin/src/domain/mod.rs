//! Domain Layer - The Scheduling Twin
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Domain Layer                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │                                                             │
//! │  Thread Module               Policy Module                  │
//! │  ├─ ThreadId / ThreadState   ├─ Algorithm (closed enum)     │
//! │  ├─ ThreadSpec               ├─ select_next                 │
//! │  └─ ThreadRecord + history   └─ should_preempt              │
//! │                                                             │
//! │                    Engine Module                            │
//! │                    ├─ SchedulerEngine (tick protocol)       │
//! │                    ├─ SchedulerConfig                       │
//! │                    └─ CoreSlot (per-core record)            │
//! │                                                             │
//! │  Event Log (newest first)    Statistics (derived)           │
//! │                                                             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing in this layer does I/O or touches a clock. Time is the engine's own
//! tick counter, advanced one unit per [`SchedulerEngine::tick`] call.

pub mod engine;
pub mod log;
pub mod policy;
pub mod stats;
pub mod thread;

pub use engine::{
    CoreEvent, CoreSlot, SchedulerConfig, SchedulerEngine, TickReport, DEFAULT_MAX_TICKS,
};
pub use log::{EventLog, LogEntry};
pub use policy::{select_next, should_preempt, Algorithm};
pub use stats::{SimulationStats, StateCounts};
pub use thread::{Interval, ThreadId, ThreadRecord, ThreadSpec, ThreadState, Tick};
