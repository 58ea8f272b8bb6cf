//! Scheduling Algorithm Tag
//!
//! # Design Notes
//!
//! The algorithm is a closed enum. The selector and the preemption check match
//! on it exhaustively, so adding a policy is a compile error everywhere it
//! needs handling rather than a silent fallback branch.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Scheduling policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Algorithm {
    /// First-come-first-served: earliest arrival, then lowest id
    #[serde(rename = "FCFS")]
    Fcfs,

    /// Shortest job first: least remaining time, then earliest arrival
    #[serde(rename = "SJF")]
    Sjf,

    /// Highest priority, then earliest arrival
    #[serde(rename = "PRIORITY")]
    Priority,

    /// Round-robin: FIFO over ready-queue entry order, bounded by the quantum
    #[default]
    #[serde(rename = "RR")]
    RoundRobin,
}

impl Algorithm {
    /// Every algorithm, in display order
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Fcfs,
        Algorithm::Sjf,
        Algorithm::Priority,
        Algorithm::RoundRobin,
    ];

    /// Short upper-case tag used in logs and files
    pub const fn as_str(self) -> &'static str {
        match self {
            Algorithm::Fcfs => "FCFS",
            Algorithm::Sjf => "SJF",
            Algorithm::Priority => "PRIORITY",
            Algorithm::RoundRobin => "RR",
        }
    }

    /// Whether ranking-based preemption can apply to this policy
    ///
    /// FCFS never preempts; RR preempts only on quantum expiry.
    #[inline(always)]
    pub const fn supports_preemption(self) -> bool {
        matches!(self, Algorithm::Sjf | Algorithm::Priority)
    }

    /// Whether the quantum bounds a run under this policy
    #[inline(always)]
    pub const fn uses_quantum(self) -> bool {
        matches!(self, Algorithm::RoundRobin)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace(['-', '_'], "").as_str() {
            "FCFS" => Ok(Algorithm::Fcfs),
            "SJF" => Ok(Algorithm::Sjf),
            "PRIORITY" => Ok(Algorithm::Priority),
            "RR" | "ROUNDROBIN" => Ok(Algorithm::RoundRobin),
            _ => Err(ConfigError::UnknownAlgorithm(s.to_string())),
        }
    }
}
