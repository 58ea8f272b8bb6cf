//! Thread Types - Identity, Lifecycle State, Execution Intervals
//!
//! # Lifecycle
//!
//! ```text
//!            admission            dispatch
//!   NEW ───────────────> READY ───────────> RUNNING ──────> TERMINATED
//!                          ↑  ↑                │ │  remaining == 0
//!                          │  └────────────────┘ │
//!                          │   quantum expiry /  │ ForceBlock
//!                          │   preemption /      ↓
//!                          │   core removal    BLOCKED
//!                          └─────────────────────┘
//!                                 Unblock
//! ```
//!
//! `TERMINATED` is absorbing. Every other move is rejected by
//! [`ThreadState::can_transition_to`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Simulation tick (abstract, one unit per `tick()` call)
pub type Tick = u64;

/// Thread identifier
///
/// # Design Notes
///
/// Identifiers are positive and assigned in creation order starting at 1, so
/// the record for `ThreadId(n)` lives at index `n - 1` of the engine's thread
/// table. The engine never hands out `ThreadId(0)`.
///
/// # Example
///
/// ```rust
/// use schedtwin::domain::thread::ThreadId;
///
/// let t1 = ThreadId::new(1);
/// assert_eq!(t1.index(), Some(0));
/// assert_eq!(t1.to_string(), "T1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThreadId(pub u32);

impl ThreadId {
    /// Create a new ThreadId
    #[inline(always)]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw numeric ID
    #[inline(always)]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Position in a creation-ordered table, `None` for the reserved id 0
    #[inline(always)]
    pub fn index(self) -> Option<usize> {
        (self.0 as usize).checked_sub(1)
    }
}

impl fmt::Display for ThreadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

/// Thread state in the scheduler
///
/// Serialized with the upper-case names renderers already key on
/// (`"NEW"`, `"READY"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ThreadState {
    /// Created, waiting for its arrival tick
    New,

    /// Admitted and waiting in the ready set
    Ready,

    /// Occupying a core
    Running,

    /// Waiting on (simulated) I/O; only `Unblock` brings it back
    Blocked,

    /// Finished; terminal
    Terminated,
}

impl ThreadState {
    /// Check whether the lifecycle allows `self -> next`
    ///
    /// # Legal Moves
    ///
    /// | from      | to                       |
    /// |-----------|--------------------------|
    /// | NEW       | READY                    |
    /// | READY     | RUNNING                  |
    /// | RUNNING   | READY, BLOCKED, TERMINATED |
    /// | BLOCKED   | READY                    |
    /// | TERMINATED| (none)                   |
    #[inline]
    pub const fn can_transition_to(self, next: ThreadState) -> bool {
        matches!(
            (self, next),
            (ThreadState::New, ThreadState::Ready)
                | (ThreadState::Ready, ThreadState::Running)
                | (ThreadState::Running, ThreadState::Ready)
                | (ThreadState::Running, ThreadState::Blocked)
                | (ThreadState::Running, ThreadState::Terminated)
                | (ThreadState::Blocked, ThreadState::Ready)
        )
    }

    /// Check if thread is waiting in the ready set
    #[inline(always)]
    pub const fn is_ready(self) -> bool {
        matches!(self, ThreadState::Ready)
    }

    /// Check if thread occupies a core
    #[inline(always)]
    pub const fn is_running(self) -> bool {
        matches!(self, ThreadState::Running)
    }

    /// Check if thread is blocked
    #[inline(always)]
    pub const fn is_blocked(self) -> bool {
        matches!(self, ThreadState::Blocked)
    }

    /// Check if thread is terminated
    #[inline(always)]
    pub const fn is_terminated(self) -> bool {
        matches!(self, ThreadState::Terminated)
    }

    /// Upper-case name, as shown in logs and timelines
    pub const fn as_str(self) -> &'static str {
        match self {
            ThreadState::New => "NEW",
            ThreadState::Ready => "READY",
            ThreadState::Running => "RUNNING",
            ThreadState::Blocked => "BLOCKED",
            ThreadState::Terminated => "TERMINATED",
        }
    }
}

impl fmt::Display for ThreadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Half-open execution interval `[start, end)` in ticks
///
/// A thread's history is a list of these, non-overlapping and ordered by
/// `start`. Renderers draw one bar per interval without replaying the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    /// First tick covered
    pub start: Tick,
    /// First tick not covered
    pub end: Tick,
    /// State the thread held for the whole span
    pub state: ThreadState,
}

impl Interval {
    /// Number of ticks covered
    #[inline(always)]
    pub const fn len(&self) -> Tick {
        self.end - self.start
    }

    /// `true` for a zero-length span (never produced by the engine)
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.end == self.start
    }
}
