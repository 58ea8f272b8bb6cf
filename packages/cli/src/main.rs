//! schedtwin - command-line driver for the scheduling twin
//!
//! ```text
//! schedtwin run --preset sjf-preemptive
//! schedtwin run --scenario classroom.json --algorithm rr --cores 2 --json
//! schedtwin play --preset rr --interval-ms 500
//! schedtwin export --preset fcfs --out fcfs.json
//! ```
//!
//! Results go to stdout; diagnostics go through `tracing` to stderr
//! (`RUST_LOG=schedtwin=debug` mirrors every event log line).

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use schedtwin::{Algorithm, EngineSnapshot, Scenario, SharedEngine, Tick, DEFAULT_MAX_TICKS};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod play;
mod report;

/// Deterministic CPU-scheduling simulator
#[derive(Parser)]
#[command(name = "schedtwin", version)]
#[command(about = "Tick-by-tick CPU scheduling simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scenario to completion (or for a fixed number of ticks)
    Run {
        #[command(flatten)]
        source: Source,
        #[command(flatten)]
        overrides: Overrides,
        /// Ticks to simulate; default runs until idle
        #[arg(short, long)]
        ticks: Option<Tick>,
        /// Print the final snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// Timer-driven run with live commands on stdin
    Play {
        #[command(flatten)]
        source: Source,
        #[command(flatten)]
        overrides: Overrides,
        /// Milliseconds between ticks
        #[arg(long, default_value_t = 500)]
        interval_ms: u64,
        /// Stop after this many ticks
        #[arg(long, default_value_t = 1_000)]
        max_ticks: Tick,
    },
    /// List built-in presets
    Presets,
    /// Write a preset as a scenario file
    Export {
        /// Preset name
        #[arg(short, long)]
        preset: String,
        /// Destination file
        #[arg(short, long)]
        out: PathBuf,
    },
}

/// Where the workload comes from
#[derive(Args, Debug)]
struct Source {
    /// Scenario file (JSON)
    #[arg(short, long, conflicts_with = "preset")]
    scenario: Option<PathBuf>,
    /// Built-in preset (see `schedtwin presets`)
    #[arg(short, long)]
    preset: Option<String>,
}

impl Source {
    fn load(&self) -> Result<Scenario> {
        match (&self.scenario, &self.preset) {
            (Some(path), _) => Scenario::load(path)
                .with_context(|| format!("failed to load scenario {}", path.display())),
            (None, Some(name)) => Scenario::preset(name).context("unknown preset"),
            (None, None) => Ok(Scenario::preset("rr")?),
        }
    }
}

/// Command-line values that replace the scenario's config
#[derive(Args, Debug)]
struct Overrides {
    /// Scheduling algorithm (fcfs, sjf, priority, rr)
    #[arg(short, long)]
    algorithm: Option<Algorithm>,
    /// Number of cores
    #[arg(short, long)]
    cores: Option<usize>,
    /// Round-robin quantum in ticks
    #[arg(short, long)]
    quantum: Option<u32>,
    /// Ranking preemption for SJF / PRIORITY; bare `--preemptive` means true
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_name = "BOOL")]
    preemptive: Option<bool>,
}

impl Overrides {
    fn apply(&self, scenario: &mut Scenario) -> Result<()> {
        let config = &mut scenario.config;
        if let Some(algorithm) = self.algorithm {
            config.algorithm = algorithm;
        }
        if let Some(cores) = self.cores {
            config.core_count = cores;
        }
        if let Some(quantum) = self.quantum {
            config.quantum = quantum;
        }
        if let Some(preemptive) = self.preemptive {
            config.preemptive = preemptive;
        }
        scenario.validate().context("invalid configuration")?;
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            source,
            overrides,
            ticks,
            json,
        } => {
            let mut scenario = source.load()?;
            overrides.apply(&mut scenario)?;
            info!(scenario = %scenario.name, config = ?scenario.config, "starting run");

            let mut engine = scenario.build();
            let executed = match ticks {
                Some(n) => {
                    for _ in 0..n {
                        engine.tick();
                    }
                    n
                }
                None => {
                    let n = engine.run_until_idle(DEFAULT_MAX_TICKS);
                    if !engine.is_idle() {
                        warn!(
                            limit = DEFAULT_MAX_TICKS,
                            "tick limit reached before the run went idle"
                        );
                    }
                    n
                }
            };
            info!(ticks = executed, "run finished");

            if json {
                let snapshot = EngineSnapshot::capture(&engine);
                println!("{}", snapshot.to_json().context("failed to serialize snapshot")?);
            } else {
                report::print_log(&engine);
                report::print_summary(&engine);
            }
        }
        Commands::Play {
            source,
            overrides,
            interval_ms,
            max_ticks,
        } => {
            let mut scenario = source.load()?;
            overrides.apply(&mut scenario)?;
            info!(scenario = %scenario.name, interval_ms, "starting live run");

            let engine = SharedEngine::new(scenario.build());
            play::run(engine.clone(), Duration::from_millis(interval_ms.max(1)), max_ticks).await?;
            engine.with(|engine| report::print_summary(engine));
        }
        Commands::Presets => {
            for name in Scenario::preset_names() {
                let scenario = Scenario::preset(name)?;
                println!(
                    "{:<20} {:<9} cores={} quantum={} preemptive={} threads={}",
                    name,
                    scenario.config.algorithm,
                    scenario.config.core_count,
                    scenario.config.quantum,
                    scenario.config.preemptive,
                    scenario.threads.len()
                );
            }
        }
        Commands::Export { preset, out } => {
            let scenario = Scenario::preset(&preset).context("unknown preset")?;
            scenario
                .save(&out)
                .with_context(|| format!("failed to write {}", out.display()))?;
            info!(preset = %preset, path = %out.display(), "scenario exported");
        }
    }

    Ok(())
}
