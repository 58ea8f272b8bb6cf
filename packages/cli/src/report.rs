//! Plain-text rendering of an engine's log, threads and statistics

use schedtwin::{Interval, LogEntry, SchedulerEngine};

/// Whole event log, oldest first
pub fn print_log(engine: &SchedulerEngine) {
    println!("── event log ──");
    for entry in engine.log().entries().rev() {
        println!("{entry}");
    }
    println!();
}

/// Entries added after the first `printed` ones, oldest first
pub fn unseen(engine: &SchedulerEngine, printed: usize) -> impl Iterator<Item = &LogEntry> {
    let log = engine.log();
    let fresh = log.len().saturating_sub(printed);
    log.entries().take(fresh).rev()
}

/// Print log lines added since the last call and return the new total
///
/// `printed` is the number of entries already shown.
pub fn print_new_entries(engine: &SchedulerEngine, printed: usize) -> usize {
    for entry in unseen(engine, printed) {
        println!("{entry}");
    }
    engine.log().len()
}

/// Per-thread table followed by aggregate statistics
pub fn print_summary(engine: &SchedulerEngine) {
    println!(
        "{:<5} {:>5} {:>5} {:>7} {:<11} {:>7} {:>10}  history",
        "id", "burst", "prio", "arrival", "state", "waiting", "turnaround"
    );
    for t in engine.threads() {
        println!(
            "{:<5} {:>5} {:>5} {:>7} {:<11} {:>7} {:>10}  {}",
            t.id().to_string(),
            t.burst_time(),
            t.priority(),
            t.arrival_time(),
            t.state().as_str(),
            dash(t.waiting_time()),
            dash(t.turnaround_time()),
            spans(t.history())
        );
    }

    let stats = engine.stats();
    println!();
    println!(
        "time={} utilization={:.1}% avg_waiting={} avg_turnaround={}",
        stats.current_time,
        stats.utilization * 100.0,
        average(stats.average_waiting_time),
        average(stats.average_turnaround_time)
    );
    for (core, busy) in stats.core_busy_ticks.iter().enumerate() {
        println!("CPU {core}: busy {busy} ticks");
    }
}

fn dash(value: Option<u64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

fn average(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.2}"))
}

fn spans(history: &[Interval]) -> String {
    history
        .iter()
        .map(|i| format!("[{},{})", i.start, i.end))
        .collect::<Vec<_>>()
        .join(" ")
}
