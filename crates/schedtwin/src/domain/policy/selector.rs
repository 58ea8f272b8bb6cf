//! Policy Selector
//!
//! Two pure functions over borrowed records:
//!
//! - [`select_next`] picks the best candidate from a ready set.
//! - [`should_preempt`] decides whether a candidate displaces a running thread.
//!
//! # Ordering Keys
//!
//! | algorithm | best candidate                              |
//! |-----------|---------------------------------------------|
//! | FCFS      | min `(arrival_time, id)`                    |
//! | RR        | min `queue_sequence`                        |
//! | SJF       | min `(remaining_time, arrival_time)`        |
//! | PRIORITY  | max `priority`, then min `arrival_time`     |
//!
//! `Iterator::min_by_key` returns the first of several equal minima, so any
//! tie the key leaves open falls to the earliest candidate in iteration
//! (creation) order and the choice is deterministic.

use super::types::Algorithm;
use crate::domain::thread::ThreadRecord;
use std::cmp::Reverse;

/// Pick the next thread to dispatch, `None` for an empty ready set
///
/// The engine passes only `READY` threads, in creation order. The selector
/// itself ranks whatever it is given and never looks at `state`.
///
/// # Example
///
/// ```rust
/// use schedtwin::domain::engine::SchedulerEngine;
/// use schedtwin::domain::policy::{select_next, Algorithm};
/// use schedtwin::domain::thread::{ThreadId, ThreadSpec};
///
/// let mut engine = SchedulerEngine::default();
/// engine.create_thread(ThreadSpec::new(3, 0, 5));
/// engine.create_thread(ThreadSpec::new(3, 0, 2));
/// engine.create_thread(ThreadSpec::new(3, 0, 2));
///
/// let best = select_next(Algorithm::Fcfs, engine.threads()).unwrap();
/// assert_eq!(best.id(), ThreadId::new(2));
/// ```
pub fn select_next<'a, I>(algorithm: Algorithm, ready: I) -> Option<&'a ThreadRecord>
where
    I: IntoIterator<Item = &'a ThreadRecord>,
{
    let ready = ready.into_iter();
    match algorithm {
        Algorithm::Fcfs => ready.min_by_key(|t| (t.arrival_time(), t.id())),
        Algorithm::RoundRobin => ready.min_by_key(|t| t.queue_sequence()),
        Algorithm::Sjf => ready.min_by_key(|t| (t.remaining_time(), t.arrival_time())),
        Algorithm::Priority => ready.min_by_key(|t| (Reverse(t.priority()), t.arrival_time())),
    }
}

/// Whether `candidate` should displace `running`
///
/// Only consulted when preemption is enabled. FCFS and RR never preempt on
/// ranking; RR gives up the core through quantum expiry instead.
#[inline]
pub fn should_preempt(
    algorithm: Algorithm,
    running: &ThreadRecord,
    candidate: &ThreadRecord,
) -> bool {
    match algorithm {
        Algorithm::Sjf => candidate.remaining_time() < running.remaining_time(),
        Algorithm::Priority => candidate.priority() > running.priority(),
        Algorithm::Fcfs | Algorithm::RoundRobin => false,
    }
}
