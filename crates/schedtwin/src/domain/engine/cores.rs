//! Per-Core Records
//!
//! One [`CoreSlot`] per simulated core, stored in a `Vec` indexed by core id.
//! The slot carries the occupant and the quantum counter together, so a
//! counter always exists for every core and both are cleared in one place.

use crate::domain::thread::{ThreadId, Tick};
use serde::{Deserialize, Serialize};

/// Occupancy and accounting for one core
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CoreSlot {
    /// Thread running here, if any
    pub occupant: Option<ThreadId>,
    /// Consecutive ticks the current occupant has run
    pub quantum_used: u32,
    /// Ticks this core spent executing since the last reset
    pub busy_ticks: Tick,
}

impl CoreSlot {
    /// Idle core with zeroed counters
    pub const IDLE: CoreSlot = CoreSlot {
        occupant: None,
        quantum_used: 0,
        busy_ticks: 0,
    };

    /// `true` when no thread occupies the core
    #[inline(always)]
    pub const fn is_idle(&self) -> bool {
        self.occupant.is_none()
    }

    /// Install `thread` with a fresh quantum
    #[inline]
    pub(crate) fn occupy(&mut self, thread: ThreadId) {
        debug_assert!(self.occupant.is_none(), "core already occupied");
        self.occupant = Some(thread);
        self.quantum_used = 0;
    }

    /// Remove the occupant and reset the quantum, returning who left
    #[inline]
    pub(crate) fn release(&mut self) -> Option<ThreadId> {
        self.quantum_used = 0;
        self.occupant.take()
    }

    /// Count one executed tick
    #[inline]
    pub(crate) fn account_tick(&mut self) {
        self.quantum_used = self.quantum_used.saturating_add(1);
        self.busy_ticks += 1;
    }
}
