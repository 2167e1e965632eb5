//! Integration tests for scenario snapshots and simulated-result files.

mod common;

use std::fs;

use heat_optimizer::assets::{ProductionUnit, load_catalog};
use heat_optimizer::io::{ResultStore, load_simulated, save_simulated};
use heat_optimizer::sim::engine::dispatch;

#[test]
fn saved_units_load_back_unchanged() {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = ResultStore::new(dir.path().join("SavedResults"));
    let units = common::reference_catalog();

    store.save_results("Scenario2", &units).expect("save");
    let loaded = store.load_results("Scenario2").expect("load");

    assert_eq!(loaded, units);
    assert_eq!(loaded[4].co2_emission, None);
    assert_eq!(loaded[0].oil_consumption, None);
}

#[test]
fn saved_snapshot_is_a_readable_catalog() {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = ResultStore::new(dir.path());
    let units = vec![
        ProductionUnit::new("BoilerA", 4.0, 500.0).with_co2(120.0),
        ProductionUnit::new("BoilerB", 6.0, 750.0).with_co2(180.0),
    ];
    let path = store.save_results("UnitTestScenario", &units).expect("save");

    let text = fs::read_to_string(&path).expect("read");
    assert!(text.trim_end().ends_with("TOTAL,,1250,300,,,"));

    // TOTAL row is never read back as a unit
    let parsed = load_catalog(&path).expect("load");
    assert_eq!(parsed.records, units);
    assert!(parsed.issues.is_empty());
}

#[test]
fn overwriting_a_snapshot_replaces_it() {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = ResultStore::new(dir.path());
    let units = common::reference_catalog();

    store.save_results("X", &units).expect("first save");
    store.save_results("X", &units[..2]).expect("second save");

    assert_eq!(store.load_results("X").expect("load"), &units[..2]);
}

#[test]
fn simulated_results_round_trip() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("out").join("Winter_simulated.csv");
    let demand = common::hourly_demand(&[8.0, 13.7, 19.25, 0.1]);
    let run = dispatch(&common::reference_catalog(), &demand);

    // rows for GB1 carry neither electricity figure
    assert!(
        run.results
            .iter()
            .any(|r| r.electricity_produced.is_none() && r.electricity_consumed.is_none())
    );

    save_simulated(&path, &run.results).expect("save");
    let loaded = load_simulated(&path).expect("load");

    assert!(loaded.issues.is_empty(), "{:?}", loaded.issues);
    assert_eq!(loaded.records, run.results);
}

#[test]
fn missing_simulated_file_is_empty() {
    let dir = tempfile::tempdir().expect("temp dir");
    let loaded = load_simulated(&dir.path().join("scenario1_simulated.csv")).expect("load");
    assert!(loaded.records.is_empty());
}

#[test]
fn malformed_catalog_line_is_skipped() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("ProductionUnits.csv");
    fs::write(&path, "GB1,4.0,520,175\nOB1,4.0\nHP1,6.0,60,,,,-6.0\n").expect("write");

    let parsed = load_catalog(&path).expect("load");
    let names: Vec<&str> = parsed.records.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, ["GB1", "HP1"]);
    assert_eq!(parsed.issues.len(), 1);
}
