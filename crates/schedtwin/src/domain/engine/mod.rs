//! Engine Module - SchedulerEngine and Its Per-Core State
//!
//! # Module Structure
//!
//! ```text
//! domain/engine/
//! ├── config.rs  SchedulerConfig (policy settings)
//! ├── cores.rs   CoreSlot (occupant, quantum, busy ticks)
//! ├── engine.rs  SchedulerEngine, TickReport, CoreEvent
//! └── mod.rs     This file
//! ```
//!
//! # Invariants
//!
//! Checked by [`SchedulerEngine::check_invariants`] and asserted after every
//! mutating operation in debug builds:
//!
//! - a core slot holds at most one thread, and that thread is `RUNNING` with
//!   the slot's index as its `core_id`;
//! - every `RUNNING` thread is held by the slot its `core_id` names;
//! - no thread outside `RUNNING` claims a core;
//! - `0 <= remaining_time <= burst_time`, and `remaining_time == 0` exactly
//!   for `TERMINATED` threads.

pub mod config;
pub mod cores;
#[allow(clippy::module_inception)]
pub mod engine;

pub use config::SchedulerConfig;
pub use cores::CoreSlot;
pub use engine::{CoreEvent, SchedulerEngine, TickReport, DEFAULT_MAX_TICKS};
