//! Unit catalog loading.
//!
//! Catalog files are comma-separated, one unit per line:
//! `Name,MaxHeat,ProductionCost,CO2Emission,GasConsumption,OilConsumption,MaxElectricity`.
//! The header line is optional and the last four columns may be blank or missing.

use std::fs;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info, warn};

use super::unit::ProductionUnit;
use crate::error::{Error, Parsed, Result, RowIssue};
use crate::io::fields::{parse_number, parse_optional};

/// Default catalog file name looked up next to a demand file.
pub const DEFAULT_CATALOG_FILE: &str = "ProductionUnits.csv";

/// Column names of the catalog layout, in file order.
pub const CATALOG_COLUMNS: [&str; 7] = [
    "Name",
    "MaxHeat",
    "ProductionCost",
    "CO2Emission",
    "GasConsumption",
    "OilConsumption",
    "MaxElectricity",
];

/// Name of the summary row appended to saved scenario snapshots.
///
/// The summary row leaves `MaxHeat` blank, so a real unit called `TOTAL`
/// is still read as a unit.
pub const TOTAL_ROW: &str = "TOTAL";

/// Lines with fewer fields than this are skipped.
const MIN_FIELDS: usize = 4;

/// Parses catalog text.
///
/// Lines that are short or whose name, max heat, or production cost do not
/// parse are skipped and reported; everything else is kept in source order.
/// A first line whose `MaxHeat` field is not numeric is taken as the header,
/// and a [`TOTAL_ROW`] summary line is ignored. Names are kept exactly as
/// written, surrounding spaces included.
pub fn parse_catalog(text: &str) -> Parsed<ProductionUnit> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut parsed = Parsed::empty();
    for (index, row) in reader.records().enumerate() {
        let record = match row {
            Ok(record) => record,
            Err(err) => {
                let line = err.position().map_or(index + 1, |p| p.line() as usize);
                parsed.issues.push(RowIssue::new(line, err.to_string()));
                continue;
            }
        };
        let line = record.position().map_or(index + 1, |p| p.line() as usize);

        if index == 0 && is_header(&record) {
            debug!(line, "skipping catalog header");
            continue;
        }
        if is_summary(&record) {
            continue;
        }

        match parse_unit(&record) {
            Ok(unit) => parsed.records.push(unit),
            Err(reason) => parsed.issues.push(RowIssue::new(line, reason)),
        }
    }

    for issue in &parsed.issues {
        warn!(%issue, "skipped catalog line");
    }
    parsed
}

fn is_header(record: &StringRecord) -> bool {
    record
        .get(1)
        .is_some_and(|max_heat| parse_number(max_heat).is_none())
}

fn is_summary(record: &StringRecord) -> bool {
    record.get(0) == Some(TOTAL_ROW) && record.get(1).is_none_or(|f| f.trim().is_empty())
}

fn parse_unit(record: &StringRecord) -> std::result::Result<ProductionUnit, String> {
    if record.len() < MIN_FIELDS {
        return Err(format!(
            "expected at least {MIN_FIELDS} fields, found {}",
            record.len()
        ));
    }

    let name = record.get(0).unwrap_or_default();
    if name.trim().is_empty() {
        return Err("Name is blank".to_string());
    }
    let max_heat = required(record, 1)?;
    let production_cost = required(record, 2)?;

    Ok(ProductionUnit {
        name: name.to_string(),
        max_heat,
        production_cost,
        co2_emission: parse_optional(record.get(3)),
        gas_consumption: parse_optional(record.get(4)),
        oil_consumption: parse_optional(record.get(5)),
        max_electricity: parse_optional(record.get(6)),
    })
}

fn required(record: &StringRecord, index: usize) -> std::result::Result<f64, String> {
    let raw = record.get(index).unwrap_or_default();
    parse_number(raw).ok_or_else(|| format!("{} `{raw}` is not a number", CATALOG_COLUMNS[index]))
}

/// Loads a catalog file, treating a missing file as an empty catalog.
///
/// # Errors
///
/// Returns [`Error::Read`] if the file exists but cannot be read.
pub fn load_catalog(path: &Path) -> Result<Parsed<ProductionUnit>> {
    if !path.exists() {
        warn!(path = %path.display(), "unit catalog not found, using empty catalog");
        return Ok(Parsed::empty());
    }
    read_catalog(path)
}

/// Loads the catalog that must sit next to `demand_path`.
///
/// # Errors
///
/// Returns [`Error::CatalogNotFound`] when the companion file is absent, and
/// [`Error::Read`] if it cannot be read.
pub fn load_companion_catalog(demand_path: &Path, catalog_file: &str) -> Result<Parsed<ProductionUnit>> {
    let path = companion_path(demand_path, catalog_file);
    if !path.is_file() {
        return Err(Error::CatalogNotFound(path));
    }
    read_catalog(&path)
}

/// Location of the catalog belonging to a demand file: same directory, fixed name.
pub fn companion_path(demand_path: &Path, catalog_file: &str) -> PathBuf {
    demand_path
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(catalog_file)
}

fn read_catalog(path: &Path) -> Result<Parsed<ProductionUnit>> {
    let text = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed = parse_catalog(&text);
    info!(
        path = %path.display(),
        units = parsed.records.len(),
        skipped = parsed.issues.len(),
        "loaded unit catalog"
    );
    for unit in &parsed.records {
        debug!(unit = %unit.name, max_heat = unit.max_heat, cost = unit.production_cost, "catalog unit");
    }
    Ok(parsed)
}
