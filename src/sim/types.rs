//! Core dispatch types: per-unit results, shortfalls, and the run that collects them.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::io::fields::format_timestamp;

/// Ranking used to order units before greedy allocation.
///
/// # Examples
///
/// ```
/// use heat_optimizer::sim::types::MeritOrder;
///
/// assert_eq!(MeritOrder::default(), MeritOrder::Cost);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeritOrder {
    /// Ascending production cost.
    #[default]
    Cost,
    /// Ascending CO₂ factor, units with an unknown factor last.
    Emissions,
}

/// One unit's contribution at one timestep.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulatedResult {
    pub time: NaiveDateTime,
    pub unit_name: String,
    /// Heat produced (MW), never above the unit's max heat.
    pub heat_produced: f64,
    /// `heat_produced * production_cost`.
    pub cost: f64,
    /// `heat_produced * co2_emission`, zero when the factor is unknown.
    pub co2: f64,
    /// Present only for units with positive electrical capacity.
    pub electricity_produced: Option<f64>,
    /// Present only for units with negative electrical capacity.
    pub electricity_consumed: Option<f64>,
}

impl fmt::Display for SimulatedResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {:<6} heat={:>7.2} MW  cost={:>10.2}  co2={:>9.2}",
            format_timestamp(&self.time),
            self.unit_name,
            self.heat_produced,
            self.cost,
            self.co2,
        )?;
        if let Some(e) = self.electricity_produced {
            write!(f, "  el+={e:.2} MW")?;
        }
        if let Some(e) = self.electricity_consumed {
            write!(f, "  el-={e:.2} MW")?;
        }
        Ok(())
    }
}

/// Demand left uncovered at a timestep after every unit ran at full output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shortfall {
    pub time: NaiveDateTime,
    /// Requested heat (MW).
    pub demand: f64,
    /// Heat that could not be supplied (MW, > 0).
    pub unmet: f64,
}

/// Allocation for a single timestep.
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    pub results: Vec<SimulatedResult>,
    pub shortfall: Option<Shortfall>,
}

/// Everything one dispatch run produced, in demand order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DispatchRun {
    pub results: Vec<SimulatedResult>,
    pub shortfalls: Vec<Shortfall>,
}

impl DispatchRun {
    /// Total unmet heat over the run (MW summed over timesteps).
    pub fn total_unmet(&self) -> f64 {
        self.shortfalls.iter().map(|s| s.unmet).sum()
    }
}
