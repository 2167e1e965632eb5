//! Heat-demand time series loading.
//!
//! Two historical layouts are supported:
//! - `Time,HeatDemand,ElectricityPrice`
//! - `Index,Time,HeatDemand,ElectricityPrice`
//!
//! The layout is sniffed once per file from the header text and the shape of
//! the first data row, then every row is parsed with the matching column map.
//! Rows with an unparseable timestamp or demand are skipped and reported.

use std::fmt;
use std::fs;
use std::path::Path;

use chrono::NaiveDateTime;
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Serialize;
use tracing::{info, warn};

use crate::error::{Error, Parsed, Result, RowIssue};
use crate::io::fields::{parse_number, parse_optional, parse_timestamp};

/// One timestep of required heat.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemandPoint {
    pub time: NaiveDateTime,
    /// Required heat (MW).
    pub demand: f64,
    /// Electricity price for the timestep, when the source carries one.
    pub electricity_price: Option<f64>,
}

impl DemandPoint {
    pub fn new(time: NaiveDateTime, demand: f64) -> Self {
        Self {
            time,
            demand,
            electricity_price: None,
        }
    }
}

/// Column layout of a demand file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemandFormat {
    /// `Time, HeatDemand[, ElectricityPrice]`
    ThreeColumn,
    /// `Index, Time, HeatDemand[, ElectricityPrice]`
    FourColumnIndexed,
    Unrecognized,
}

impl DemandFormat {
    /// Column positions of (time, demand, price), if the layout is known.
    fn columns(self) -> Option<(usize, usize, usize)> {
        match self {
            Self::ThreeColumn => Some((0, 1, 2)),
            Self::FourColumnIndexed => Some((1, 2, 3)),
            Self::Unrecognized => None,
        }
    }
}

impl fmt::Display for DemandFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ThreeColumn => "time,demand,price",
            Self::FourColumnIndexed => "index,time,demand,price",
            Self::Unrecognized => "unrecognized",
        };
        f.write_str(name)
    }
}

/// Result of format sniffing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sniffed {
    pub format: DemandFormat,
    /// Whether the first row is a header rather than data.
    pub has_header: bool,
}

/// Determines the layout from the header row text and the first data row's shape.
pub fn sniff_format(rows: &[StringRecord]) -> Sniffed {
    let Some(first) = rows.first() else {
        return Sniffed {
            format: DemandFormat::Unrecognized,
            has_header: false,
        };
    };

    let has_header = !looks_like_data(first);
    if has_header {
        if let Some(format) = format_from_header(first) {
            return Sniffed { format, has_header };
        }
    }

    let data_row = if has_header { rows.get(1) } else { Some(first) };
    let format = data_row.map_or(DemandFormat::Unrecognized, format_from_shape);
    Sniffed { format, has_header }
}

fn looks_like_data(row: &StringRecord) -> bool {
    row.iter().take(2).any(|field| parse_timestamp(field).is_some())
}

fn format_from_header(header: &StringRecord) -> Option<DemandFormat> {
    let cell = |i: usize| header.get(i).unwrap_or_default().to_ascii_lowercase();
    let (first, second) = (cell(0), cell(1));

    if first.contains("time") && second.contains("demand") {
        Some(DemandFormat::ThreeColumn)
    } else if second.contains("time") && cell(2).contains("demand") {
        Some(DemandFormat::FourColumnIndexed)
    } else {
        None
    }
}

fn format_from_shape(row: &StringRecord) -> DemandFormat {
    let field = |i: usize| row.get(i).unwrap_or_default();

    if row.len() >= 3
        && field(0).parse::<u64>().is_ok()
        && parse_timestamp(field(1)).is_some()
    {
        DemandFormat::FourColumnIndexed
    } else if row.len() >= 2 && parse_timestamp(field(0)).is_some() {
        DemandFormat::ThreeColumn
    } else {
        DemandFormat::Unrecognized
    }
}

/// Parses demand text in whichever supported layout it uses.
///
/// An unrecognized layout yields no points and a single issue on line 1. A
/// first row that is neither a known header nor valid data is reported when
/// its demand field is numeric.
pub fn parse_demand(text: &str) -> Parsed<DemandPoint> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let mut parsed = Parsed::empty();
    let mut rows = Vec::new();
    for (index, row) in reader.records().enumerate() {
        match row {
            Ok(record) => rows.push(record),
            Err(err) => {
                let line = err.position().map_or(index + 1, |p| p.line() as usize);
                parsed.issues.push(RowIssue::new(line, err.to_string()));
            }
        }
    }

    let sniffed = sniff_format(&rows);
    let Some((time_col, demand_col, price_col)) = sniffed.format.columns() else {
        if !rows.is_empty() {
            parsed
                .issues
                .push(RowIssue::new(1, "unrecognized demand file layout"));
        }
        return parsed;
    };

    let skip = usize::from(sniffed.has_header);
    if let Some(first) = rows.first().filter(|_| sniffed.has_header) {
        // an unlabelled first row with a numeric demand is data with a bad timestamp
        if format_from_header(first).is_none()
            && first.get(demand_col).and_then(parse_number).is_some()
        {
            let line = first.position().map_or(1, |p| p.line() as usize);
            let raw_time = first.get(time_col).unwrap_or_default();
            parsed
                .issues
                .push(RowIssue::new(line, format!("`{raw_time}` is not a timestamp")));
        }
    }
    for (index, record) in rows.iter().enumerate().skip(skip) {
        let line = record.position().map_or(index + 1, |p| p.line() as usize);
        let raw_time = record.get(time_col).unwrap_or_default();
        let raw_demand = record.get(demand_col).unwrap_or_default();

        let Some(time) = parse_timestamp(raw_time) else {
            parsed
                .issues
                .push(RowIssue::new(line, format!("`{raw_time}` is not a timestamp")));
            continue;
        };
        let Some(demand) = parse_number(raw_demand) else {
            parsed
                .issues
                .push(RowIssue::new(line, format!("heat demand `{raw_demand}` is not a number")));
            continue;
        };

        parsed.records.push(DemandPoint {
            time,
            demand,
            electricity_price: parse_optional(record.get(price_col)),
        });
    }

    parsed
}

/// Loads a demand file, treating a missing file as an empty series.
///
/// # Errors
///
/// Returns [`Error::Read`] if the file exists but cannot be read.
pub fn load_demand(path: &Path) -> Result<Parsed<DemandPoint>> {
    if !path.exists() {
        warn!(path = %path.display(), "demand file not found, using empty series");
        return Ok(Parsed::empty());
    }

    let text = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed = parse_demand(&text);
    for issue in &parsed.issues {
        warn!(path = %path.display(), %issue, "skipped demand row");
    }
    info!(
        path = %path.display(),
        points = parsed.records.len(),
        skipped = parsed.issues.len(),
        "loaded demand series"
    );
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(text: &str) -> Vec<StringRecord> {
        ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(text.as_bytes())
            .records()
            .filter_map(std::result::Result::ok)
            .collect()
    }

    #[test]
    fn sniffs_three_column_header() {
        let s = sniff_format(&rows("Time,HeatDemand,ElectricityPrice\n2024-01-01 00:00,6.6,1190.94\n"));
        assert_eq!(s.format, DemandFormat::ThreeColumn);
        assert!(s.has_header);
    }

    #[test]
    fn sniffs_indexed_header() {
        let s = sniff_format(&rows(
            "Index,Time,HeatDemand,ElectricityPrice\n0,2024-01-01 00:00,6.6,1190.94\n",
        ));
        assert_eq!(s.format, DemandFormat::FourColumnIndexed);
    }

    #[test]
    fn sniffs_unlabelled_header_by_first_row_shape() {
        let s = sniff_format(&rows(",,,\n0,2024-01-01 00:00,6.6,1190.94\n"));
        assert_eq!(s.format, DemandFormat::FourColumnIndexed);
        assert!(s.has_header);
    }

    #[test]
    fn sniffs_headerless_file() {
        let s = sniff_format(&rows("2024-01-01 00:00,6.6\n"));
        assert_eq!(s.format, DemandFormat::ThreeColumn);
        assert!(!s.has_header);
    }

    #[test]
    fn unrecognized_layout_yields_nothing() {
        let parsed = parse_demand("foo,bar\nbaz,qux\n");
        assert!(parsed.records.is_empty());
        assert_eq!(parsed.issues.len(), 1);
    }

    #[test]
    fn parses_prices_and_preserves_order() {
        let text = "\
Time,HeatDemand,ElectricityPrice
2024-01-01 00:00,6.62,1190.94
2024-01-01 01:00,6.85,1154.55
2024-01-01 02:00,7.03,1116.22
";
        let parsed = parse_demand(text);
        assert!(parsed.issues.is_empty());
        let demand: Vec<f64> = parsed.records.iter().map(|p| p.demand).collect();
        assert_eq!(demand, [6.62, 6.85, 7.03]);
        let prices: Vec<Option<f64>> = parsed.records.iter().map(|p| p.electricity_price).collect();
        assert_eq!(prices, [Some(1190.94), Some(1154.55), Some(1116.22)]);
    }

    #[test]
    fn bad_rows_are_skipped_not_fatal() {
        let text = "\
Index,Time,HeatDemand,ElectricityPrice
0,2024-01-01 00:00,6.62,1190.94
1,not a time,6.85,1154.55
2,2024-01-01 02:00,lots,1116.22
3,2024-01-01 03:00,7.10,
";
        let parsed = parse_demand(text);
        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.records[1].demand, 7.10);
        assert_eq!(parsed.records[1].electricity_price, None);
        let lines: Vec<usize> = parsed.issues.iter().map(|i| i.line).collect();
        assert_eq!(lines, [3, 4]);
    }

    #[test]
    fn headerless_first_row_with_bad_time_is_reported() {
        let text = "\
2024-13-01 00:00,6.62
2024-01-01 01:00,6.85
2024-01-01 02:00,7.03
";
        let parsed = parse_demand(text);
        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.issues.len(), 1);
        assert_eq!(parsed.issues[0].line, 1);
        assert!(parsed.issues[0].reason.contains("2024-13-01"));
    }

    #[test]
    fn unlabelled_header_row_is_not_an_issue() {
        let parsed = parse_demand("Date,Heat\n2024-01-01 00:00,6.62\n");
        assert_eq!(parsed.records.len(), 1);
        assert!(parsed.issues.is_empty());
    }

    #[test]
    fn empty_text_is_empty_series() {
        let parsed = parse_demand("");
        assert!(parsed.records.is_empty());
        assert!(parsed.issues.is_empty());
    }
}
