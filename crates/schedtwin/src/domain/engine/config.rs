//! Scheduler Configuration

use crate::domain::policy::Algorithm;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Policy settings replaced wholesale by `update_config`
///
/// Defaults match a freshly opened simulator: round-robin, one core,
/// quantum 3, no ranking preemption.
///
/// # Example
///
/// ```rust
/// use schedtwin::domain::engine::SchedulerConfig;
/// use schedtwin::domain::policy::Algorithm;
///
/// let config = SchedulerConfig::new(Algorithm::Sjf, 2, true, 3);
/// assert!(config.validate().is_ok());
/// assert!(SchedulerConfig { core_count: 0, ..config }.validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Selection policy
    pub algorithm: Algorithm,
    /// Number of simulated cores
    pub core_count: usize,
    /// Enable ranking preemption (SJF and PRIORITY only)
    pub preemptive: bool,
    /// Round-robin time slice, in ticks
    pub quantum: u32,
}

impl SchedulerConfig {
    /// Build a configuration
    pub const fn new(
        algorithm: Algorithm,
        core_count: usize,
        preemptive: bool,
        quantum: u32,
    ) -> Self {
        Self {
            algorithm,
            core_count,
            preemptive,
            quantum,
        }
    }

    /// Reject zero cores or a zero quantum
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.core_count == 0 {
            return Err(ConfigError::ZeroCores);
        }
        if self.quantum == 0 {
            return Err(ConfigError::ZeroQuantum);
        }
        Ok(())
    }

    /// Whether ranking preemption is live under this configuration
    #[inline(always)]
    pub const fn ranking_preemption(&self) -> bool {
        self.preemptive && self.algorithm.supports_preemption()
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self::new(Algorithm::RoundRobin, 1, false, 3)
    }
}
