//! Integration tests for merit-order dispatch over the reference fleet.

mod common;

use std::collections::HashMap;

use heat_optimizer::assets::ProductionUnit;
use heat_optimizer::error::Error;
use heat_optimizer::sim::engine::{Engine, dispatch};
use heat_optimizer::sim::kpi::KpiReport;
use heat_optimizer::sim::types::MeritOrder;

const EPS: f64 = 1e-9;

fn capacity(units: &[ProductionUnit]) -> f64 {
    units.iter().map(|u| u.max_heat).sum()
}

#[test]
fn supplied_heat_is_demand_capped_at_capacity() {
    let units = common::reference_catalog();
    let cap = capacity(&units);
    let values = [0.0, 0.5, 4.0, 6.0, 9.99, 13.5, cap, cap + 0.01, 40.0];
    let demand = common::hourly_demand(&values);

    let run = dispatch(&units, &demand);

    for point in &demand {
        let supplied: f64 = run
            .results
            .iter()
            .filter(|r| r.time == point.time)
            .map(|r| r.heat_produced)
            .sum();
        assert!(
            (supplied - point.demand.min(cap)).abs() < EPS,
            "demand {} supplied {supplied}",
            point.demand
        );

        let shortfall = run.shortfalls.iter().find(|s| s.time == point.time);
        if point.demand > cap {
            let unmet = shortfall.map(|s| s.unmet).unwrap_or_default();
            assert!((unmet - (point.demand - cap)).abs() < EPS);
        } else {
            assert!(shortfall.is_none(), "no shortfall expected at {}", point.demand);
        }
    }
}

#[test]
fn no_unit_exceeds_its_capacity() {
    let units = common::reference_catalog();
    let max: HashMap<&str, f64> = units.iter().map(|u| (u.name.as_str(), u.max_heat)).collect();
    let demand = common::hourly_demand(&[3.0, 11.0, 17.5, 25.0]);

    let run = dispatch(&units, &demand);

    assert!(!run.results.is_empty());
    for r in &run.results {
        assert!(r.heat_produced > 0.0);
        assert!(r.heat_produced <= max[r.unit_name.as_str()] + EPS, "{r}");
    }
}

#[test]
fn costlier_unit_never_runs_while_cheaper_has_headroom() {
    let units = common::reference_catalog();
    let by_name: HashMap<&str, &ProductionUnit> = units.iter().map(|u| (u.name.as_str(), u)).collect();
    let demand = common::hourly_demand(&[2.0, 7.0, 10.0, 13.0, 16.5, 21.0]);

    let run = dispatch(&units, &demand);

    for point in &demand {
        let step: Vec<_> = run.results.iter().filter(|r| r.time == point.time).collect();
        for costly in &step {
            let costly_unit = by_name[costly.unit_name.as_str()];
            for cheaper in units.iter().filter(|u| u.production_cost < costly_unit.production_cost) {
                let used = step
                    .iter()
                    .find(|r| r.unit_name == cheaper.name)
                    .map_or(0.0, |r| r.heat_produced);
                assert!(
                    (used - cheaper.max_heat).abs() < EPS,
                    "{} ran while {} had headroom at demand {}",
                    costly.unit_name,
                    cheaper.name,
                    point.demand
                );
            }
        }
    }
}

#[test]
fn concrete_two_unit_scenario() {
    let units = vec![
        ProductionUnit::new("GB1", 4.0, 520.0),
        ProductionUnit::new("HP1", 6.0, 300.0),
    ];
    let run = dispatch(&units, &common::hourly_demand(&[8.0]));

    let rows: Vec<(&str, f64)> = run
        .results
        .iter()
        .map(|r| (r.unit_name.as_str(), r.heat_produced))
        .collect();
    assert_eq!(rows, [("HP1", 6.0), ("GB1", 2.0)]);
    assert!(run.shortfalls.is_empty());
}

#[test]
fn cost_co2_and_electricity_follow_unit_factors() {
    let units = common::reference_catalog();
    // 15 MW: HP1 6, GB1 4, GB2 3, OB1 2
    let run = dispatch(&units, &common::hourly_demand(&[15.0]));

    let ob1 = run.results.iter().find(|r| r.unit_name == "OB1").expect("OB1 runs");
    assert!((ob1.heat_produced - 2.0).abs() < EPS);
    assert!((ob1.cost - 1340.0).abs() < EPS);
    assert!((ob1.co2 - 660.0).abs() < EPS);

    let hp1 = run.results.iter().find(|r| r.unit_name == "HP1").expect("HP1 runs");
    assert_eq!(hp1.co2, 0.0);
    assert_eq!(hp1.electricity_produced, None);
    assert_eq!(hp1.electricity_consumed, Some(6.0));

    assert!(run.results.iter().all(|r| r.unit_name != "GM1"));
}

#[test]
fn emissions_order_defers_unknown_factor() {
    let units = common::reference_catalog();
    let engine = Engine::new(units, common::hourly_demand(&[5.0]), MeritOrder::Emissions);
    let ranked: Vec<&str> = engine.units().iter().map(|u| u.name.as_str()).collect();
    assert_eq!(ranked, ["GB2", "GB1", "OB1", "GM1", "HP1"]);

    let run = engine.run();
    let rows: Vec<(&str, f64)> = run
        .results
        .iter()
        .map(|r| (r.unit_name.as_str(), r.heat_produced))
        .collect();
    assert_eq!(rows, [("GB2", 3.0), ("GB1", 2.0)]);
}

#[test]
fn kpi_totals_agree_with_results() {
    let units = common::reference_catalog();
    let demand = common::hourly_demand(&[8.0, 12.0, 22.0]);
    let run = dispatch(&units, &demand);
    let kpi = KpiReport::from_run(&run, &demand);

    let heat: f64 = run.results.iter().map(|r| r.heat_produced).sum();
    let cost: f64 = run.results.iter().map(|r| r.cost).sum();
    assert!((kpi.total_heat - heat).abs() < EPS);
    assert!((kpi.total_cost - cost).abs() < EPS);
    assert!((kpi.total_heat + kpi.total_unmet - kpi.total_demand).abs() < EPS);
    assert_eq!(kpi.shortfall_steps, 1);
    assert_eq!(kpi.timesteps, 3);
}

#[test]
fn engine_from_demand_file_requires_companion_catalog() {
    let dir = tempfile::tempdir().expect("temp dir");
    let demand_path = dir.path().join("winter.csv");
    common::write_demand(&demand_path, &[8.0]);

    let result = Engine::from_demand_file(&demand_path, "ProductionUnits.csv", MeritOrder::Cost);
    match result {
        Err(Error::CatalogNotFound(path)) => assert!(path.ends_with("ProductionUnits.csv")),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("missing catalog must be fatal"),
    }
}

#[test]
fn engine_from_demand_file_uses_companion_catalog() {
    let (_dir, path) = common::data_dir(&[8.0, 9.0]);
    let engine = Engine::from_demand_file(&path.join("winter.csv"), "ProductionUnits.csv", MeritOrder::Cost)
        .expect("inputs load");
    assert_eq!(engine.units().len(), 5);
    assert_eq!(engine.demand().len(), 2);
    assert_eq!(engine.units()[0].name, "HP1");
}
