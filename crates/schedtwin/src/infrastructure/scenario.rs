//! Scenario Files - Configuration Plus Workload as JSON
//!
//! # Format
//!
//! ```json
//! {
//!   "name": "sjf-demo",
//!   "config": { "algorithm": "SJF", "core_count": 1, "preemptive": true, "quantum": 3 },
//!   "threads": [
//!     { "burst_time": 8, "priority": 0, "arrival_time": 0 },
//!     { "burst_time": 2, "arrival_time": 3 }
//!   ]
//! }
//! ```
//!
//! Missing config fields fall back to [`SchedulerConfig::default`]; missing
//! `priority` / `arrival_time` fall back to 0. Every load is validated, so a
//! scenario that reaches the engine always satisfies the engine's input
//! assumptions (positive bursts, at least one core, positive quantum).

use crate::domain::engine::{SchedulerConfig, SchedulerEngine};
use crate::domain::policy::Algorithm;
use crate::domain::thread::{ThreadId, ThreadSpec};
use crate::error::{ConfigError, ScenarioError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Named configuration and workload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Policy settings
    #[serde(default)]
    pub config: SchedulerConfig,
    /// Threads, created in this order
    #[serde(default)]
    pub threads: Vec<ThreadSpec>,
}

impl Scenario {
    /// Empty scenario
    pub fn new(name: impl Into<String>, config: SchedulerConfig) -> Self {
        Self {
            name: name.into(),
            config,
            threads: Vec::new(),
        }
    }

    /// Builder-style thread append
    pub fn with_thread(mut self, burst_time: u32, priority: i32, arrival_time: u64) -> Self {
        self.threads.push(ThreadSpec::new(burst_time, priority, arrival_time));
        self
    }

    /// Check config and every thread spec
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.config.validate()?;
        for (index, spec) in self.threads.iter().enumerate() {
            spec.validate()
                .map_err(|_| ConfigError::ZeroBurst { index: Some(index) })?;
        }
        Ok(())
    }

    /// Parse and validate JSON text
    pub fn from_json(text: &str) -> Result<Self, ScenarioError> {
        let scenario: Scenario = serde_json::from_str(text)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Pretty-printed JSON
    pub fn to_json(&self) -> Result<String, ScenarioError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read and validate a scenario file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let scenario = Self::from_json(&text)?;
        tracing::info!(
            path = %path.display(),
            name = %scenario.name,
            threads = scenario.threads.len(),
            "scenario loaded"
        );
        Ok(scenario)
    }

    /// Write the scenario as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ScenarioError> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reset `engine`, apply the config and create the threads
    ///
    /// Returns the new thread ids in scenario order.
    pub fn apply(&self, engine: &mut SchedulerEngine) -> Vec<ThreadId> {
        engine.reset();
        engine.update_config(self.config);
        self.threads.iter().map(|spec| engine.create_thread(*spec)).collect()
    }

    /// Fresh engine loaded with this scenario
    pub fn build(&self) -> SchedulerEngine {
        let mut engine = SchedulerEngine::new(self.config);
        self.apply(&mut engine);
        engine
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // Built-in presets
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// Names accepted by [`Self::preset`]
    pub const fn preset_names() -> &'static [&'static str] {
        &["rr", "rr-two-core", "fcfs", "sjf-preemptive", "priority-preemptive"]
    }

    /// Look up a built-in classroom workload
    pub fn preset(name: &str) -> Result<Self, ConfigError> {
        let scenario = match name {
            "rr" => Scenario::new(name, SchedulerConfig::new(Algorithm::RoundRobin, 1, false, 3))
                .with_thread(15, 1, 0)
                .with_thread(15, 1, 0)
                .with_thread(15, 1, 0),
            "rr-two-core" => {
                Scenario::new(name, SchedulerConfig::new(Algorithm::RoundRobin, 2, false, 3))
                    .with_thread(20, 1, 0)
                    .with_thread(20, 1, 0)
            }
            "fcfs" => Scenario::new(name, SchedulerConfig::new(Algorithm::Fcfs, 1, false, 3))
                .with_thread(6, 0, 0)
                .with_thread(3, 0, 1)
                .with_thread(4, 0, 2),
            "sjf-preemptive" => {
                Scenario::new(name, SchedulerConfig::new(Algorithm::Sjf, 1, true, 3))
                    .with_thread(8, 0, 0)
                    .with_thread(4, 0, 1)
                    .with_thread(2, 0, 2)
                    .with_thread(1, 0, 3)
            }
            "priority-preemptive" => {
                Scenario::new(name, SchedulerConfig::new(Algorithm::Priority, 1, true, 3))
                    .with_thread(10, 1, 0)
                    .with_thread(4, 5, 2)
                    .with_thread(3, 3, 4)
            }
            other => return Err(ConfigError::UnknownPreset(other.to_string())),
        };
        Ok(scenario)
    }
}
