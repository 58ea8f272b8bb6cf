//! Engine Behaviour Tests
//!
//! End-to-end traces for each policy, the manual overrides, reconfiguration
//! and reset, driven only through the public API.

use schedtwin::domain::policy::select_next;
use schedtwin::{
    Algorithm, EngineError, Interval, SchedulerConfig, SchedulerEngine, ThreadId, ThreadSpec,
    ThreadState, DEFAULT_MAX_TICKS,
};

fn engine(algorithm: Algorithm, cores: usize, preemptive: bool, quantum: u32) -> SchedulerEngine {
    SchedulerEngine::new(SchedulerConfig::new(algorithm, cores, preemptive, quantum))
}

fn ran(start: u64, end: u64) -> Interval {
    Interval {
        start,
        end,
        state: ThreadState::Running,
    }
}

fn chronological(engine: &SchedulerEngine) -> Vec<String> {
    engine.logs().into_iter().rev().collect()
}

/// Termination tick is where the last execution interval ends
fn assert_times_consistent(engine: &SchedulerEngine) {
    for t in engine.threads().iter().filter(|t| t.state().is_terminated()) {
        let turnaround = t.turnaround_time().unwrap();
        let waiting = t.waiting_time().unwrap();
        let finished_at = t.history().last().unwrap().end;
        assert_eq!(waiting + u64::from(t.burst_time()), turnaround, "{}", t.id());
        assert_eq!(turnaround, finished_at - t.arrival_time(), "{}", t.id());
    }
}

mod fcfs {
    use super::*;

    #[test]
    fn test_earliest_arrival_then_lowest_id() {
        let mut engine = engine(Algorithm::Fcfs, 1, false, 3);
        engine.create_thread(ThreadSpec::new(3, 0, 5));
        engine.create_thread(ThreadSpec::new(3, 0, 2));
        engine.create_thread(ThreadSpec::new(3, 0, 2));

        engine.tick();
        engine.tick();
        assert_eq!(engine.cores()[0].occupant, Some(ThreadId::new(2)));
        assert_eq!(engine.thread(ThreadId::new(3)).unwrap().state(), ThreadState::Ready);
    }

    #[test]
    fn test_selector_on_raw_records() {
        let mut engine = engine(Algorithm::Fcfs, 1, false, 3);
        engine.create_thread(ThreadSpec::new(3, 0, 5));
        engine.create_thread(ThreadSpec::new(3, 0, 2));
        engine.create_thread(ThreadSpec::new(3, 0, 2));
        let best = select_next(Algorithm::Fcfs, engine.threads()).unwrap();
        assert_eq!(best.id(), ThreadId::new(2));
    }

    #[test]
    fn test_full_run_times() {
        let mut engine = engine(Algorithm::Fcfs, 1, false, 3);
        engine.create_thread(ThreadSpec::new(6, 0, 0));
        engine.create_thread(ThreadSpec::new(3, 0, 1));
        engine.create_thread(ThreadSpec::new(4, 0, 2));
        engine.run_until_idle(DEFAULT_MAX_TICKS);

        let finish: Vec<u64> = engine
            .threads()
            .iter()
            .map(|t| t.history().last().unwrap().end)
            .collect();
        assert_eq!(finish, vec![7, 10, 14]);
        assert_times_consistent(&engine);
    }
}

mod round_robin {
    use super::*;

    #[test]
    fn test_lone_thread_quantum_three_burst_seven() {
        let mut engine = engine(Algorithm::RoundRobin, 1, false, 3);
        let t = engine.create_thread(ThreadSpec::new(7, 0, 0));
        engine.run_until_idle(DEFAULT_MAX_TICKS);

        let record = engine.thread(t).unwrap();
        let executed: u64 = record.history().iter().map(Interval::len).sum();
        assert_eq!(executed, 7);
        assert_eq!(record.state(), ThreadState::Terminated);

        assert_eq!(
            chronological(&engine),
            vec![
                "[000] Thread T1 Created (Burst: 7, Prio: 0, Arr: 0)",
                "[001] CPU 0: Dispatched T1 (RR)",
                "[004] CPU 0: T1 Quantum Expired",
                "[004] CPU 0: Dispatched T1 (RR)",
                "[007] CPU 0: T1 Quantum Expired",
                "[007] CPU 0: Dispatched T1 (RR)",
                "[008] CPU 0: T1 Terminated",
            ]
        );
        assert_times_consistent(&engine);
    }

    #[test]
    fn test_demoted_thread_goes_to_back_of_queue() {
        let mut engine = engine(Algorithm::RoundRobin, 1, false, 2);
        let a = engine.create_thread(ThreadSpec::new(5, 0, 0));
        let b = engine.create_thread(ThreadSpec::new(5, 0, 0));
        let c = engine.create_thread(ThreadSpec::new(5, 0, 0));

        let mut order = Vec::new();
        for _ in 0..12 {
            let report = engine.tick();
            order.extend(report.dispatched());
        }
        assert_eq!(order, vec![a, b, c, a, b, c]);
    }

    #[test]
    fn test_two_cores_share_three_threads() {
        let mut engine = engine(Algorithm::RoundRobin, 2, false, 3);
        for _ in 0..3 {
            engine.create_thread(ThreadSpec::new(6, 1, 0));
        }
        engine.run_until_idle(DEFAULT_MAX_TICKS);
        assert!(engine.threads().iter().all(|t| t.state().is_terminated()));
        assert_eq!(engine.stats().core_busy_ticks.iter().sum::<u64>(), 18);
        assert_times_consistent(&engine);
    }
}

mod shortest_job_first {
    use super::*;

    #[test]
    fn test_non_preemptive_never_interrupts() {
        let mut engine = engine(Algorithm::Sjf, 1, false, 3);
        let long = engine.create_thread(ThreadSpec::new(10, 0, 0));
        let short = engine.create_thread(ThreadSpec::new(1, 0, 2));
        engine.run_until_idle(DEFAULT_MAX_TICKS);

        assert_eq!(engine.thread(long).unwrap().history(), &[ran(1, 11)]);
        assert_eq!(engine.thread(short).unwrap().history(), &[ran(11, 12)]);
    }

    #[test]
    fn test_preemptive_switches_on_next_tick() {
        let mut engine = engine(Algorithm::Sjf, 1, true, 3);
        let long = engine.create_thread(ThreadSpec::new(6, 0, 0));
        let short = engine.create_thread(ThreadSpec::new(2, 0, 2));

        engine.tick();
        assert_eq!(engine.thread(long).unwrap().remaining_time(), 6);

        engine.tick();
        let record = engine.thread(long).unwrap();
        assert_eq!(record.remaining_time(), 5);
        assert_eq!(record.state(), ThreadState::Ready);
        assert_eq!(engine.cores()[0].occupant, Some(short));
        assert!(engine.logs().contains(&"[002] CPU 0: T1 Preempted by T2".to_string()));

        engine.run_until_idle(DEFAULT_MAX_TICKS);
        assert_times_consistent(&engine);
    }
}

mod priority {
    use super::*;

    #[test]
    fn test_preemptive_higher_priority_takes_core() {
        let mut engine = engine(Algorithm::Priority, 1, true, 3);
        let low = engine.create_thread(ThreadSpec::new(10, 1, 0));
        let high = engine.create_thread(ThreadSpec::new(4, 5, 3));

        engine.tick();
        engine.tick();
        assert_eq!(engine.cores()[0].occupant, Some(low));

        engine.tick();
        assert_eq!(engine.cores()[0].occupant, Some(high));
        assert_eq!(engine.thread(low).unwrap().state(), ThreadState::Ready);

        engine.run_until_idle(DEFAULT_MAX_TICKS);
        assert_eq!(engine.thread(low).unwrap().history().len(), 2);
        assert_times_consistent(&engine);
    }

    #[test]
    fn test_preemption_flag_ignored_for_fcfs() {
        let mut engine = engine(Algorithm::Fcfs, 1, true, 3);
        let first = engine.create_thread(ThreadSpec::new(5, 0, 0));
        engine.create_thread(ThreadSpec::new(1, 9, 1));
        for _ in 0..4 {
            engine.tick();
        }
        assert_eq!(engine.cores()[0].occupant, Some(first));
    }
}

mod overrides {
    use super::*;

    #[test]
    fn test_blocked_thread_waits_until_unblocked() {
        let mut engine = engine(Algorithm::Fcfs, 1, false, 3);
        let a = engine.create_thread(ThreadSpec::new(3, 0, 0));
        let b = engine.create_thread(ThreadSpec::new(2, 0, 0));

        engine.tick();
        engine.tick();
        engine.force_block(a).unwrap();
        engine.run_until_idle(DEFAULT_MAX_TICKS);

        assert_eq!(engine.thread(a).unwrap().state(), ThreadState::Blocked);
        assert_eq!(engine.thread(a).unwrap().remaining_time(), 2);
        assert_eq!(engine.thread(b).unwrap().state(), ThreadState::Terminated);

        engine.unblock(a).unwrap();
        engine.run_until_idle(DEFAULT_MAX_TICKS);
        assert_eq!(engine.thread(a).unwrap().state(), ThreadState::Terminated);
        assert_times_consistent(&engine);
    }

    #[test]
    fn test_invalid_targets_report_and_do_nothing() {
        let mut engine = engine(Algorithm::Fcfs, 1, false, 3);
        let a = engine.create_thread(ThreadSpec::new(1, 0, 0));
        engine.run_until_idle(DEFAULT_MAX_TICKS);
        let before = engine.logs();

        assert!(matches!(
            engine.force_block(a),
            Err(EngineError::NotEligible {
                current: ThreadState::Terminated,
                ..
            })
        ));
        assert!(matches!(
            engine.unblock(ThreadId::new(7)),
            Err(EngineError::ThreadNotFound { .. })
        ));
        assert_eq!(engine.logs(), before);
    }
}

mod reconfiguration {
    use super::*;

    #[test]
    fn test_removing_core_demotes_t5() {
        let mut engine = engine(Algorithm::Fcfs, 2, false, 3);
        for _ in 0..4 {
            engine.create_thread(ThreadSpec::new(4, 0, 100));
        }
        let t5 = engine.create_thread(ThreadSpec::new(10, 0, 1));
        let t6 = engine.create_thread(ThreadSpec::new(10, 0, 0));

        engine.tick();
        assert_eq!(engine.cores()[0].occupant, Some(t6));
        assert_eq!(engine.cores()[1].occupant, Some(t5));

        engine.update_config(SchedulerConfig::new(Algorithm::Fcfs, 1, false, 3));
        let record = engine.thread(t5).unwrap();
        assert_eq!(record.state(), ThreadState::Ready);
        assert_eq!(record.remaining_time(), 10);
        assert_eq!(engine.logs()[0], "[001] CPU 1 Removed. T5 -> Ready");
        assert_eq!(engine.threads().len(), 6);
        assert!(engine.check_invariants().is_ok());
    }

    #[test]
    fn test_switch_algorithm_mid_run() {
        let mut engine = engine(Algorithm::Fcfs, 1, false, 3);
        engine.create_thread(ThreadSpec::new(8, 0, 0));
        let short = engine.create_thread(ThreadSpec::new(2, 0, 0));
        engine.tick();
        engine.tick();

        engine.update_config(SchedulerConfig::new(Algorithm::Sjf, 1, true, 3));
        engine.tick();
        assert_eq!(engine.cores()[0].occupant, Some(short));
    }
}

#[test]
fn test_reset_clears_everything() {
    let mut engine = engine(Algorithm::RoundRobin, 2, false, 3);
    engine.create_thread(ThreadSpec::new(5, 0, 0));
    engine.run_until_idle(3);
    engine.reset();

    assert!(engine.threads().is_empty());
    assert_eq!(engine.current_time(), 0);
    assert!(engine.logs().is_empty());
    assert_eq!(engine.cores().len(), 2);
    assert!(engine.cores().iter().all(|c| c.is_idle() && c.busy_ticks == 0));
}
