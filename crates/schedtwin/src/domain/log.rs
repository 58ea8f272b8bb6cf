//! Event Log - Most-Recent-First Transition Record
//!
//! The engine appends one entry per state transition it wants a human to see.
//! Entries are rendered as `[<tick:03>] <message>` and read back newest first.
//!
//! # Two Channels
//!
//! Every entry is also emitted as a `tracing` event at `DEBUG` so an operator
//! can follow a run with `RUST_LOG=schedtwin=debug`; the log itself stays the
//! user-facing record that renderers poll.

use crate::domain::thread::Tick;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// One log line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Tick at which the transition happened
    pub tick: Tick,
    /// Message body without the tick prefix
    pub message: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:03}] {}", self.tick, self.message)
    }
}

/// Append-only log, newest first
///
/// Nothing is ever dropped except by [`SchedulerEngine::reset`], so `len()`
/// only grows between resets and can serve as a read cursor.
///
/// [`SchedulerEngine::reset`]: crate::domain::engine::SchedulerEngine::reset
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    entries: VecDeque<LogEntry>,
}

impl EventLog {
    /// Unbounded log
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` at `tick`
    pub(crate) fn push(&mut self, tick: Tick, message: String) {
        tracing::debug!(tick, "{message}");
        self.entries.push_front(LogEntry { tick, message });
    }

    /// Entries, most recent first
    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &LogEntry> + ExactSizeIterator {
        self.entries.iter()
    }

    /// Formatted lines, most recent first
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }

    /// Most recent entry
    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.front()
    }

    /// Number of entries held
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when nothing has been logged
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}
