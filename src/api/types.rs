//! API response and query types.
//!
//! Timestamps use the same `YYYY-MM-DD HH:MM:SS` text as the result files.

use serde::{Deserialize, Serialize};

use crate::assets::selection::SortKey;
use crate::assets::summary::CatalogSummary;
use crate::io::fields::format_timestamp;
use crate::runner::ScenarioRun;
use crate::sim::kpi::KpiReport;
use crate::sim::types::SimulatedResult;

/// One entry of the scenario listing.
#[derive(Debug, Serialize)]
pub struct ScenarioListing {
    pub name: String,
    /// Units in the fleet.
    pub units: usize,
    /// Demand points dispatched.
    pub timesteps: usize,
    pub summary: CatalogSummary,
    pub total_cost: f64,
    pub total_co2: f64,
    pub total_unmet: f64,
}

impl From<&ScenarioRun> for ScenarioListing {
    fn from(run: &ScenarioRun) -> Self {
        Self {
            name: run.name.clone(),
            units: run.units.len(),
            timesteps: run.kpi.timesteps,
            summary: run.summary.clone(),
            total_cost: run.kpi.total_cost,
            total_co2: run.kpi.total_co2,
            total_unmet: run.kpi.total_unmet,
        }
    }
}

/// Single result row, laid out like a simulated-result file line.
#[derive(Debug, Serialize)]
pub struct ResultRecord {
    pub time: String,
    pub unit: String,
    pub heat_produced: f64,
    pub cost: f64,
    pub co2: f64,
    pub electricity_produced: Option<f64>,
    pub electricity_consumed: Option<f64>,
}

impl From<&SimulatedResult> for ResultRecord {
    fn from(r: &SimulatedResult) -> Self {
        Self {
            time: format_timestamp(&r.time),
            unit: r.unit_name.clone(),
            heat_produced: r.heat_produced,
            cost: r.cost,
            co2: r.co2,
            electricity_produced: r.electricity_produced,
            electricity_consumed: r.electricity_consumed,
        }
    }
}

/// KPI report together with the timesteps that went short.
#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub kpi: KpiReport,
    pub shortfalls: Vec<ShortfallRecord>,
}

#[derive(Debug, Serialize)]
pub struct ShortfallRecord {
    pub time: String,
    pub demand: f64,
    pub unmet: f64,
}

impl From<&ScenarioRun> for ReportResponse {
    fn from(run: &ScenarioRun) -> Self {
        Self {
            kpi: run.kpi.clone(),
            shortfalls: run
                .run
                .shortfalls
                .iter()
                .map(|s| ShortfallRecord {
                    time: format_timestamp(&s.time),
                    demand: s.demand,
                    unmet: s.unmet,
                })
                .collect(),
        }
    }
}

/// Optional ordering for the units endpoint.
#[derive(Debug, Deserialize)]
pub struct UnitsQuery {
    /// `name`, `production_cost` or `co2_emission`; catalog order when absent.
    pub sort: Option<SortKey>,
}

/// Optional filters for the results endpoint.
#[derive(Debug, Deserialize)]
pub struct ResultsQuery {
    /// Keep only this unit's rows.
    pub unit: Option<String>,
    /// Start time (inclusive), any accepted timestamp form.
    pub from: Option<String>,
    /// End time (inclusive).
    pub to: Option<String>,
}

/// Error response body for 4xx errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn result_record_formats_time_and_renames_unit() {
        let time = NaiveDate::from_ymd_opt(2024, 2, 1)
            .and_then(|d| d.and_hms_opt(5, 0, 0))
            .expect("valid test date");
        let result = SimulatedResult {
            time,
            unit_name: "GM1".to_string(),
            heat_produced: 3.5,
            cost: 3465.0,
            co2: 2275.0,
            electricity_produced: Some(2.6),
            electricity_consumed: None,
        };
        let record = ResultRecord::from(&result);

        assert_eq!(record.time, "2024-02-01 05:00:00");
        assert_eq!(record.unit, "GM1");
        assert_eq!(record.heat_produced, 3.5);
        assert_eq!(record.electricity_produced, Some(2.6));
        assert_eq!(record.electricity_consumed, None);
    }
}
