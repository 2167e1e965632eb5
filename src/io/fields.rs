//! Field-level parsing and formatting shared by every delimited-text format.
//!
//! Numbers are locale-invariant (`.` decimal separator, no grouping) and are
//! written with the shortest representation that parses back to the same
//! `f64`. Timestamps are always written as `YYYY-MM-DD HH:MM:SS`, followed by
//! fractional seconds only when they are non-zero.

use chrono::{NaiveDate, NaiveDateTime};

/// Output form of every timestamp this crate writes.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Accepted date-time input forms, tried in order. Day-first precedes month-first.
const DATETIME_INPUT_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Parses a number, rejecting blanks, non-numeric text, and non-finite values.
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// "Parse or absent": a missing, blank, or non-numeric field yields `None`.
pub fn parse_optional(raw: Option<&str>) -> Option<f64> {
    raw.and_then(parse_number)
}

/// Renders an optional number, with absence as an empty field.
pub fn format_optional(value: Option<f64>) -> String {
    value.map(format_number).unwrap_or_default()
}

pub fn format_number(value: f64) -> String {
    value.to_string()
}

/// Parses a calendar date-time in any accepted input form.
///
/// A bare `YYYY-MM-DD` date is read as midnight.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    DATETIME_INPUT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

pub fn format_timestamp(time: &NaiveDateTime) -> String {
    time.format(TIMESTAMP_FORMAT).to_string()
}
