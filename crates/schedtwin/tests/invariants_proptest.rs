//! Randomised Invariant Tests
//!
//! Random workloads and random interleavings of ticks, manual overrides and
//! reconfigurations. After every step the occupancy table must agree with the
//! thread states; once everything is unblocked and drained, the timing
//! identities must hold for every thread.

use proptest::prelude::*;
use schedtwin::{
    Algorithm, SchedulerConfig, SchedulerEngine, ThreadId, ThreadSpec, ThreadState,
    DEFAULT_MAX_TICKS,
};

#[derive(Debug, Clone)]
enum Step {
    Tick,
    Block(u32),
    Unblock(u32),
    Reconfigure(SchedulerConfig),
}

fn spec_strategy() -> impl Strategy<Value = ThreadSpec> {
    (1u32..8, 0i32..5, 0u64..10)
        .prop_map(|(burst, prio, arrival)| ThreadSpec::new(burst, prio, arrival))
}

fn config_strategy() -> impl Strategy<Value = SchedulerConfig> {
    (0usize..4, 1usize..4, any::<bool>(), 1u32..5).prop_map(|(alg, cores, preemptive, quantum)| {
        SchedulerConfig::new(Algorithm::ALL[alg], cores, preemptive, quantum)
    })
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        6 => Just(Step::Tick),
        2 => (1u32..10).prop_map(Step::Block),
        2 => (1u32..10).prop_map(Step::Unblock),
        1 => config_strategy().prop_map(Step::Reconfigure),
    ]
}

fn assert_exclusive(engine: &SchedulerEngine) {
    let running = engine.threads().iter().filter(|t| t.state().is_running()).count();
    let occupied = engine.cores().iter().filter(|c| !c.is_idle()).count();
    assert_eq!(running, occupied);
    assert!(running <= engine.config().core_count);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_random_interleavings_keep_invariants(
        specs in prop::collection::vec(spec_strategy(), 1..8),
        config in config_strategy(),
        steps in prop::collection::vec(step_strategy(), 0..60),
    ) {
        let mut engine = SchedulerEngine::new(config);
        for spec in &specs {
            engine.create_thread(*spec);
        }

        for step in steps {
            match step {
                Step::Tick => {
                    engine.tick();
                }
                Step::Block(id) => {
                    let _ = engine.force_block(ThreadId::new(id));
                }
                Step::Unblock(id) => {
                    let _ = engine.unblock(ThreadId::new(id));
                }
                Step::Reconfigure(config) => engine.update_config(config),
            }
            prop_assert!(engine.check_invariants().is_ok());
            assert_exclusive(&engine);
            prop_assert_eq!(engine.threads().len(), specs.len());
        }

        let blocked: Vec<ThreadId> = engine
            .threads()
            .iter()
            .filter(|t| t.state() == ThreadState::Blocked)
            .map(|t| t.id())
            .collect();
        for id in blocked {
            prop_assert!(engine.unblock(id).is_ok());
        }
        engine.run_until_idle(DEFAULT_MAX_TICKS);

        for t in engine.threads() {
            prop_assert_eq!(t.state(), ThreadState::Terminated);
            prop_assert_eq!(t.remaining_time(), 0);
            prop_assert_eq!(t.executed_ticks(), u64::from(t.burst_time()));

            let turnaround = t.turnaround_time().unwrap();
            let finished_at = t.history().last().unwrap().end;
            prop_assert_eq!(turnaround, finished_at - t.arrival_time());
            prop_assert_eq!(t.waiting_time().unwrap() + u64::from(t.burst_time()), turnaround);

            for pair in t.history().windows(2) {
                prop_assert!(pair[0].end < pair[1].start);
            }
        }
    }

    #[test]
    fn prop_same_inputs_same_trace(
        specs in prop::collection::vec(spec_strategy(), 1..8),
        config in config_strategy(),
    ) {
        let run = || {
            let mut engine = SchedulerEngine::new(config);
            for spec in &specs {
                engine.create_thread(*spec);
            }
            engine.run_until_idle(DEFAULT_MAX_TICKS);
            engine.logs()
        };
        prop_assert_eq!(run(), run());
    }

    #[test]
    fn prop_busy_ticks_match_total_burst(
        specs in prop::collection::vec(spec_strategy(), 1..8),
        config in config_strategy(),
    ) {
        let mut engine = SchedulerEngine::new(config);
        for spec in &specs {
            engine.create_thread(*spec);
        }
        engine.run_until_idle(DEFAULT_MAX_TICKS);

        let total: u64 = specs.iter().map(|s| u64::from(s.burst_time)).sum();
        prop_assert_eq!(engine.stats().core_busy_ticks.iter().sum::<u64>(), total);
        prop_assert!(engine.stats().utilization <= 1.0);
    }
}
