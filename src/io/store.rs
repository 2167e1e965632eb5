//! Saved scenario snapshots.
//!
//! A snapshot is the scenario's unit list in catalog layout, followed by a
//! blank line and a `TOTAL,,<sumCost>,<sumCO2>,,,` row. Snapshots live in one
//! directory as `<scenario>_saved.csv`.

use std::fs;
use std::path::PathBuf;

use tracing::{info, warn};

use super::fields::{format_number, format_optional};
use crate::assets::catalog::{CATALOG_COLUMNS, TOTAL_ROW, parse_catalog};
use crate::assets::summary::CatalogSummary;
use crate::assets::unit::ProductionUnit;
use crate::error::{Error, Result};

const SNAPSHOT_SUFFIX: &str = "_saved.csv";

/// Directory of saved scenario snapshots.
#[derive(Debug, Clone)]
pub struct ResultStore {
    dir: PathBuf,
}

impl ResultStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// File holding the snapshot of `scenario`.
    pub fn path_for(&self, scenario: &str) -> PathBuf {
        self.dir.join(format!("{scenario}{SNAPSHOT_SUFFIX}"))
    }

    /// Writes the units of `scenario`, creating the store directory if absent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Write`] if the directory or file cannot be written, or
    /// [`Error::Csv`] if a record cannot be encoded.
    pub fn save_results(&self, scenario: &str, units: &[ProductionUnit]) -> Result<PathBuf> {
        let path = self.path_for(scenario);
        let text = render_snapshot(units).map_err(|source| Error::Csv {
            path: path.clone(),
            source,
        })?;

        let write_err = |source| Error::Write {
            path: path.clone(),
            source,
        };
        fs::create_dir_all(&self.dir).map_err(write_err)?;
        fs::write(&path, text).map_err(write_err)?;

        info!(path = %path.display(), units = units.len(), "saved scenario units");
        Ok(path)
    }

    /// Reads back the units of `scenario`; a missing snapshot yields no units.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Read`] if the snapshot exists but cannot be read.
    pub fn load_results(&self, scenario: &str) -> Result<Vec<ProductionUnit>> {
        let path = self.path_for(scenario);
        if !path.exists() {
            warn!(path = %path.display(), "no saved snapshot for scenario");
            return Ok(Vec::new());
        }

        let text = fs::read_to_string(&path).map_err(|source| Error::Read {
            path: path.clone(),
            source,
        })?;
        let parsed = parse_catalog(&text);
        for issue in &parsed.issues {
            warn!(path = %path.display(), %issue, "skipped snapshot line");
        }
        info!(path = %path.display(), units = parsed.records.len(), "loaded scenario units");
        Ok(parsed.records)
    }

    /// Names of every scenario with a snapshot in the store, sorted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Read`] if the store directory exists but cannot be listed.
    pub fn scenarios(&self) -> Result<Vec<String>> {
        if !self.dir.is_dir() {
            return Ok(Vec::new());
        }
        let entries = fs::read_dir(&self.dir).map_err(|source| Error::Read {
            path: self.dir.clone(),
            source,
        })?;

        let mut names: Vec<String> = entries
            .filter_map(std::result::Result::ok)
            .filter_map(|e| {
                e.file_name()
                    .to_str()
                    .and_then(|n| n.strip_suffix(SNAPSHOT_SUFFIX))
                    .map(str::to_string)
            })
            .collect();
        names.sort();
        Ok(names)
    }
}

fn render_snapshot(units: &[ProductionUnit]) -> std::result::Result<Vec<u8>, csv::Error> {
    let mut buf = Vec::new();
    {
        let mut wtr = csv::Writer::from_writer(&mut buf);
        wtr.write_record(CATALOG_COLUMNS)?;
        for u in units {
            wtr.write_record(&[
                u.name.clone(),
                format_number(u.max_heat),
                format_number(u.production_cost),
                format_optional(u.co2_emission),
                format_optional(u.gas_consumption),
                format_optional(u.oil_consumption),
                format_optional(u.max_electricity),
            ])?;
        }
        wtr.flush()?;
    }

    buf.push(b'\n');

    let totals = CatalogSummary::from_units(units);
    let cost = format_number(totals.total_cost);
    let co2 = format_number(totals.total_co2);
    {
        let mut wtr = csv::Writer::from_writer(&mut buf);
        wtr.write_record([TOTAL_ROW, "", cost.as_str(), co2.as_str(), "", "", ""])?;
        wtr.flush()?;
    }
    Ok(buf)
}
