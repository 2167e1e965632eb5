//! Hour-of-day production profile used for charting.

use chrono::Timelike;
use serde::Serialize;

use super::types::SimulatedResult;

/// Mean heat a unit produced at one hour of the day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyHeatProduction {
    /// Hour of day, 0-23.
    pub hour: u32,
    pub unit_name: String,
    /// Mean heat produced (MW) over the results that fell in this hour.
    pub heat_produced: f64,
}

/// Averages heat per (hour of day, unit).
///
/// Output is ordered by hour, then by the order units first appear in `results`.
pub fn hourly_production(results: &[SimulatedResult]) -> Vec<HourlyHeatProduction> {
    let mut units: Vec<&str> = Vec::new();
    for r in results {
        if !units.contains(&r.unit_name.as_str()) {
            units.push(&r.unit_name);
        }
    }

    // (sum, count) per hour per unit
    let mut buckets = vec![vec![(0.0_f64, 0_usize); units.len()]; 24];
    for r in results {
        let hour = r.time.hour() as usize;
        if let Some(u) = units.iter().position(|name| *name == r.unit_name) {
            let (sum, count) = &mut buckets[hour][u];
            *sum += r.heat_produced;
            *count += 1;
        }
    }

    let mut profile = Vec::new();
    for (hour, row) in buckets.iter().enumerate() {
        for (u, &(sum, count)) in row.iter().enumerate() {
            if count > 0 {
                profile.push(HourlyHeatProduction {
                    hour: hour as u32,
                    unit_name: units[u].to_string(),
                    heat_produced: sum / count as f64,
                });
            }
        }
    }
    profile
}
