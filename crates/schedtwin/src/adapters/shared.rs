//! Shared Engine Handle
//!
//! A timer task that ticks and a command task that blocks/unblocks threads
//! both need the same engine. [`SharedEngine`] is a cloneable handle over
//! `Arc<Mutex<SchedulerEngine>>`; every call holds the lock for the entire
//! operation, so a tick always completes before any other call begins and no
//! caller ever sees a half-applied tick.

use super::snapshot::EngineSnapshot;
use crate::domain::engine::{SchedulerConfig, SchedulerEngine, TickReport};
use crate::domain::thread::{ThreadId, ThreadSpec};
use crate::error::EngineError;
use parking_lot::Mutex;
use std::sync::Arc;

/// Cloneable, lock-serialized engine handle
#[derive(Debug, Clone, Default)]
pub struct SharedEngine {
    inner: Arc<Mutex<SchedulerEngine>>,
}

impl SharedEngine {
    /// Wrap an engine
    pub fn new(engine: SchedulerEngine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    /// Run `f` with exclusive access
    ///
    /// Do not call back into the same handle from inside `f`; the lock is not
    /// re-entrant.
    pub fn with<R>(&self, f: impl FnOnce(&mut SchedulerEngine) -> R) -> R {
        let mut engine = self.inner.lock();
        f(&mut *engine)
    }

    /// Advance one tick
    pub fn tick(&self) -> TickReport {
        self.with(SchedulerEngine::tick)
    }

    /// Add a thread
    pub fn create_thread(&self, spec: ThreadSpec) -> ThreadId {
        self.with(|engine| engine.create_thread(spec))
    }

    /// Block a running thread
    pub fn force_block(&self, id: ThreadId) -> Result<(), EngineError> {
        self.with(|engine| engine.force_block(id))
    }

    /// Unblock a blocked thread
    pub fn unblock(&self, id: ThreadId) -> Result<(), EngineError> {
        self.with(|engine| engine.unblock(id))
    }

    /// Replace the policy settings
    pub fn update_config(&self, config: SchedulerConfig) {
        self.with(|engine| engine.update_config(config));
    }

    /// Clear runtime state
    pub fn reset(&self) {
        self.with(SchedulerEngine::reset);
    }

    /// `true` when nothing can progress
    pub fn is_idle(&self) -> bool {
        self.with(|engine| engine.is_idle())
    }

    /// Owned copy of the current state
    pub fn snapshot(&self) -> EngineSnapshot {
        self.with(|engine| EngineSnapshot::capture(engine))
    }
}
