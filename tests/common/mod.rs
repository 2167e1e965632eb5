//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use heat_optimizer::assets::ProductionUnit;
use heat_optimizer::source::DemandPoint;

/// Catalog text with the five reference units (GB1, GB2, OB1, GM1, HP1).
pub const CATALOG_CSV: &str = "\
Name,MaxHeat,ProductionCost,CO2Emission,GasConsumption,OilConsumption,MaxElectricity
GB1,4.0,520,175,0.9,,
GB2,3.0,560,130,0.7,,
OB1,4.0,670,330,,1.5,
GM1,3.5,990,650,1.8,,2.6
HP1,6.0,60,,,,-6.0
";

/// The reference units, matching [`CATALOG_CSV`].
pub fn reference_catalog() -> Vec<ProductionUnit> {
    vec![
        ProductionUnit::new("GB1", 4.0, 520.0).with_co2(175.0).with_gas(0.9),
        ProductionUnit::new("GB2", 3.0, 560.0).with_co2(130.0).with_gas(0.7),
        ProductionUnit::new("OB1", 4.0, 670.0).with_co2(330.0).with_oil(1.5),
        ProductionUnit::new("GM1", 3.5, 990.0)
            .with_co2(650.0)
            .with_gas(1.8)
            .with_electricity(2.6),
        ProductionUnit::new("HP1", 6.0, 60.0).with_electricity(-6.0),
    ]
}

/// Hour `h` (0-based, may exceed 23) after midnight on 2024-01-08.
pub fn hour(h: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 8)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|t| t + chrono::Duration::hours(i64::from(h)))
        .expect("valid test date")
}

/// One demand point per value, one hour apart.
pub fn hourly_demand(values: &[f64]) -> Vec<DemandPoint> {
    values
        .iter()
        .enumerate()
        .map(|(h, &d)| DemandPoint::new(hour(h as u32), d))
        .collect()
}

/// Writes a three-column demand file for `values`.
pub fn write_demand(path: &Path, values: &[f64]) {
    let mut text = String::from("Time,HeatDemand,ElectricityPrice\n");
    for (h, d) in values.iter().enumerate() {
        text.push_str(&format!("{},{d},1000\n", hour(h as u32).format("%Y-%m-%d %H:%M")));
    }
    fs::write(path, text).expect("write demand file");
}

/// Creates a data directory holding the reference catalog and a `winter.csv`.
pub fn data_dir(values: &[f64]) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("temp dir");
    fs::write(dir.path().join("ProductionUnits.csv"), CATALOG_CSV).expect("write catalog");
    write_demand(&dir.path().join("winter.csv"), values);
    let path = dir.path().to_path_buf();
    (dir, path)
}

/// The sample data shipped with the crate.
pub fn shipped_data_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data")
}
