//! Simulated-result files: one row per unit contribution per timestep.
//!
//! Layout: `Time,Unit,HeatProduced,Cost,CO2,ElectricityProduced,ElectricityConsumed`,
//! header always present, absent electricity figures written as empty fields.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::{info, warn};

use super::fields::{format_number, format_optional, format_timestamp, parse_number, parse_optional, parse_timestamp};
use crate::error::{Error, Parsed, Result, RowIssue};
use crate::sim::types::SimulatedResult;

/// Column header of simulated-result files.
pub const SIMULATED_HEADER: [&str; 7] = [
    "Time",
    "Unit",
    "HeatProduced",
    "Cost",
    "CO2",
    "ElectricityProduced",
    "ElectricityConsumed",
];

/// Writes results as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_simulated(results: &[SimulatedResult], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(SIMULATED_HEADER)?;
    for r in results {
        wtr.write_record(&[
            format_timestamp(&r.time),
            r.unit_name.clone(),
            format_number(r.heat_produced),
            format_number(r.cost),
            format_number(r.co2),
            format_optional(r.electricity_produced),
            format_optional(r.electricity_consumed),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Saves results to `path`, creating its directory if needed.
///
/// The whole file is built in memory and written once.
///
/// # Errors
///
/// Returns [`Error::Write`] if the directory or file cannot be written.
pub fn save_simulated(path: &Path, results: &[SimulatedResult]) -> Result<()> {
    let write_err = |source| Error::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut buf = Vec::new();
    write_simulated(results, &mut buf).map_err(write_err)?;

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(write_err)?;
    }
    fs::write(path, buf).map_err(write_err)?;

    info!(path = %path.display(), rows = results.len(), "saved simulated results");
    Ok(())
}

/// Parses simulated-result text.
///
/// A row is kept only if its time, unit name, heat, cost, and CO₂ all parse;
/// the electricity fields are independently optional. Unit names are kept
/// exactly as written.
pub fn parse_simulated(text: &str) -> Parsed<SimulatedResult> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut parsed = Parsed::empty();
    for (index, row) in reader.records().enumerate() {
        // header is line 1
        let fallback_line = index + 2;
        match row {
            Ok(record) => {
                let line = record.position().map_or(fallback_line, |p| p.line() as usize);
                match parse_row(&record) {
                    Ok(result) => parsed.records.push(result),
                    Err(reason) => parsed.issues.push(RowIssue::new(line, reason)),
                }
            }
            Err(err) => {
                let line = err.position().map_or(fallback_line, |p| p.line() as usize);
                parsed.issues.push(RowIssue::new(line, err.to_string()));
            }
        }
    }
    parsed
}

fn parse_row(record: &StringRecord) -> std::result::Result<SimulatedResult, String> {
    let field = |i: usize| record.get(i).unwrap_or_default();
    let number = |i: usize| {
        parse_number(field(i)).ok_or_else(|| format!("{} `{}` is not a number", SIMULATED_HEADER[i], field(i)))
    };

    let time = parse_timestamp(field(0)).ok_or_else(|| format!("`{}` is not a timestamp", field(0)))?;
    let unit_name = field(1);
    if unit_name.trim().is_empty() {
        return Err("Unit is blank".to_string());
    }

    Ok(SimulatedResult {
        time,
        unit_name: unit_name.to_string(),
        heat_produced: number(2)?,
        cost: number(3)?,
        co2: number(4)?,
        electricity_produced: parse_optional(record.get(5)),
        electricity_consumed: parse_optional(record.get(6)),
    })
}

/// Loads a simulated-result file, treating a missing file as no results.
///
/// # Errors
///
/// Returns [`Error::Read`] if the file exists but cannot be read.
pub fn load_simulated(path: &Path) -> Result<Parsed<SimulatedResult>> {
    if !path.exists() {
        warn!(path = %path.display(), "simulated results not found");
        return Ok(Parsed::empty());
    }

    let text = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed = parse_simulated(&text);
    for issue in &parsed.issues {
        warn!(path = %path.display(), %issue, "skipped simulated result row");
    }
    info!(path = %path.display(), rows = parsed.records.len(), "loaded simulated results");
    Ok(parsed)
}
