//! Scenario File Tests
//!
//! Scenarios written to disk and read back must drive the engine to exactly
//! the same trace as the in-memory original.

use schedtwin::{EngineSnapshot, Scenario, ScenarioError, SharedEngine, DEFAULT_MAX_TICKS};
use std::fs;
use tempfile::TempDir;

fn trace(scenario: &Scenario) -> Vec<String> {
    let mut engine = scenario.build();
    engine.run_until_idle(DEFAULT_MAX_TICKS);
    engine.logs()
}

#[test]
fn test_saved_presets_replay_identically() {
    let dir = TempDir::new().unwrap();

    for name in Scenario::preset_names() {
        let original = Scenario::preset(name).unwrap();
        let path = dir.path().join(format!("{name}.json"));
        original.save(&path).unwrap();

        let loaded = Scenario::load(&path).unwrap();
        assert_eq!(loaded, original);
        assert_eq!(trace(&loaded), trace(&original), "preset {name}");
    }
}

#[test]
fn test_hand_written_file_with_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("mini.json");
    let text = r#"{
        "config": { "algorithm": "FCFS" },
        "threads": [ { "burst_time": 2 }, { "burst_time": 1, "arrival_time": 1 } ]
    }"#;
    fs::write(&path, text).unwrap();

    let scenario = Scenario::load(&path).unwrap();
    let mut engine = scenario.build();
    engine.run_until_idle(DEFAULT_MAX_TICKS);

    let chronological: Vec<String> = engine.logs().into_iter().rev().collect();
    assert_eq!(
        chronological,
        vec![
            "[000] Thread T1 Created (Burst: 2, Prio: 0, Arr: 0)",
            "[000] Thread T2 Created (Burst: 1, Prio: 0, Arr: 1)",
            "[001] CPU 0: Dispatched T1 (FCFS)",
            "[003] CPU 0: T1 Terminated",
            "[003] CPU 0: Dispatched T2 (FCFS)",
            "[004] CPU 0: T2 Terminated",
        ]
    );
}

#[test]
fn test_missing_file_reports_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.json");
    match Scenario::load(&path) {
        Err(ScenarioError::Io { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[test]
fn test_invalid_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(&path, r#"{ "config": { "core_count": 0 } }"#).unwrap();
    assert!(matches!(Scenario::load(&path), Err(ScenarioError::Invalid(_))));

    fs::write(&path, "not json").unwrap();
    assert!(matches!(Scenario::load(&path), Err(ScenarioError::Json(_))));
}

#[test]
fn test_snapshot_export_round_trips() {
    let shared = SharedEngine::new(Scenario::preset("sjf-preemptive").unwrap().build());
    for _ in 0..6 {
        shared.tick();
    }
    let snapshot = shared.snapshot();

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("snapshot.json");
    fs::write(&path, snapshot.to_json().unwrap()).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let restored: EngineSnapshot = serde_json::from_str(&text).unwrap();
    assert_eq!(restored.current_time, 6);
    assert_eq!(restored.threads, snapshot.threads);
    assert_eq!(restored.log, snapshot.log);
}
