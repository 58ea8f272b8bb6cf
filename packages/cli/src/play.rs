//! Live Driver
//!
//! ```text
//!   stdin task ──(block/unblock/spawn)──► SharedEngine ◄── tick ── interval timer
//!        │                                                            │
//!        └──────────(pause/resume/quit/refresh)──► control loop ◄─────┘
//! ```
//!
//! The stdin task applies engine commands itself through its clone of the
//! shared handle; the control loop owns the timer and the screen.

use crate::report;
use anyhow::{anyhow, bail, Result};
use schedtwin::{SchedulerEngine, SharedEngine, ThreadId, ThreadSpec, ThreadState, Tick};
use std::str::FromStr;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

const USAGE: &str =
    "commands: block <id> | unblock <id> | spawn <burst> [prio] [arrival] | pause | resume | quit";

/// One line typed by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Block(ThreadId),
    Unblock(ThreadId),
    Spawn(ThreadSpec),
    Pause,
    Resume,
    Quit,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let verb = words.next().unwrap_or_default().to_ascii_lowercase();
        let args: Vec<&str> = words.collect();

        let command = match (verb.as_str(), args.as_slice()) {
            ("block", [id]) => Command::Block(parse_id(id)?),
            ("unblock", [id]) => Command::Unblock(parse_id(id)?),
            ("spawn", [burst, rest @ ..]) if rest.len() <= 2 => {
                let priority = rest.first().map(|p| p.parse::<i32>()).transpose()?.unwrap_or(0);
                let arrival = rest.get(1).map(|a| a.parse::<Tick>()).transpose()?.unwrap_or(0);
                let spec = ThreadSpec::new(burst.parse::<u32>()?, priority, arrival);
                spec.validate()?;
                Command::Spawn(spec)
            }
            ("pause", []) => Command::Pause,
            ("resume", []) => Command::Resume,
            ("quit" | "exit", []) => Command::Quit,
            _ => bail!("unrecognized command {line:?}\n{USAGE}"),
        };
        Ok(command)
    }
}

/// Accepts `3` or `T3`
fn parse_id(word: &str) -> Result<ThreadId> {
    let digits = word.trim_start_matches(['T', 't']);
    digits
        .parse::<u32>()
        .map(ThreadId::new)
        .map_err(|_| anyhow!("invalid thread id {word:?}"))
}

/// Messages from the stdin task to the control loop
#[derive(Debug)]
enum Control {
    Refresh,
    Pause,
    Resume,
    Quit,
}

async fn read_commands(engine: SharedEngine, tx: mpsc::Sender<Control>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(err) => {
                warn!(error = %err, "stdin closed");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let control = match line.parse::<Command>() {
            Ok(Command::Block(id)) => apply(engine.force_block(id)),
            Ok(Command::Unblock(id)) => apply(engine.unblock(id)),
            Ok(Command::Spawn(spec)) => {
                engine.create_thread(spec);
                Control::Refresh
            }
            Ok(Command::Pause) => Control::Pause,
            Ok(Command::Resume) => Control::Resume,
            Ok(Command::Quit) => Control::Quit,
            Err(err) => {
                eprintln!("{err:#}");
                continue;
            }
        };
        if tx.send(control).await.is_err() {
            break;
        }
    }
}

fn apply(result: Result<(), schedtwin::EngineError>) -> Control {
    if let Err(err) = result {
        eprintln!("{err}");
    }
    Control::Refresh
}

/// `true` once there is work and all of it is done
///
/// An empty engine is not finished: the user may still `spawn`.
fn all_terminated(engine: &SchedulerEngine) -> bool {
    let threads = engine.threads();
    !threads.is_empty() && threads.iter().all(|t| t.state() == ThreadState::Terminated)
}

/// Tick `engine` every `period` until every thread has terminated, the user
/// quits, Ctrl-C arrives, or `max_ticks` is reached
pub async fn run(engine: SharedEngine, period: Duration, max_ticks: Tick) -> Result<()> {
    let (tx, mut rx) = mpsc::channel(16);
    let input = tokio::spawn(read_commands(engine.clone(), tx));

    let mut timer = tokio::time::interval(period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut printed = engine.with(|e| report::print_new_entries(e, 0));
    let mut paused = false;
    let mut input_open = true;

    loop {
        tokio::select! {
            _ = timer.tick(), if !paused => {
                let (tick, finished) = engine.with(|e| {
                    let report = e.tick();
                    printed = report::print_new_entries(e, printed);
                    (report.tick, all_terminated(e))
                });
                if finished {
                    info!(tick, "all threads terminated");
                    break;
                }
                if tick >= max_ticks {
                    warn!(tick, "tick limit reached");
                    break;
                }
            }
            control = rx.recv(), if input_open => match control {
                Some(Control::Refresh) => {
                    printed = engine.with(|e| report::print_new_entries(e, printed));
                }
                Some(Control::Pause) => {
                    info!("paused");
                    paused = true;
                }
                Some(Control::Resume) => {
                    info!("resumed");
                    paused = false;
                }
                Some(Control::Quit) => break,
                None => {
                    input_open = false;
                    paused = false;
                }
            },
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted");
                break;
            }
        }
    }

    input.abort();
    Ok(())
}
