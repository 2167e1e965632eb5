//! Post-hoc KPI computation from a dispatch run.

use std::fmt;

use serde::Serialize;

use super::types::DispatchRun;
use crate::source::demand::DemandPoint;

/// Per-unit totals over a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UnitTotals {
    pub unit_name: String,
    /// Heat produced over the run (MWh at one-hour steps).
    pub heat: f64,
    pub cost: f64,
    pub co2: f64,
    pub electricity_produced: f64,
    pub electricity_consumed: f64,
    /// Timesteps in which the unit produced heat.
    pub active_steps: usize,
}

/// Aggregate indicators of a complete run.
///
/// Computed from the run's results and the demand that drove it, so the
/// report always agrees with the per-unit rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct KpiReport {
    /// Number of demand points dispatched.
    pub timesteps: usize,
    pub total_demand: f64,
    pub peak_demand: f64,
    pub total_heat: f64,
    pub total_cost: f64,
    pub total_co2: f64,
    pub total_electricity_produced: f64,
    pub total_electricity_consumed: f64,
    /// Heat that could not be supplied.
    pub total_unmet: f64,
    /// Timesteps with unmet demand.
    pub shortfall_steps: usize,
    /// `total_cost / total_heat`, zero when nothing was produced.
    pub average_cost_per_mwh: f64,
    /// Per-unit totals in first-dispatched order.
    pub units: Vec<UnitTotals>,
}

impl KpiReport {
    pub fn from_run(run: &DispatchRun, demand: &[DemandPoint]) -> Self {
        let mut report = Self {
            timesteps: demand.len(),
            total_demand: demand.iter().map(|p| p.demand).sum(),
            peak_demand: demand.iter().map(|p| p.demand).fold(0.0, f64::max),
            total_unmet: run.total_unmet(),
            shortfall_steps: run.shortfalls.len(),
            ..Self::default()
        };

        for r in &run.results {
            report.total_heat += r.heat_produced;
            report.total_cost += r.cost;
            report.total_co2 += r.co2;
            report.total_electricity_produced += r.electricity_produced.unwrap_or(0.0);
            report.total_electricity_consumed += r.electricity_consumed.unwrap_or(0.0);

            let idx = match report.units.iter().position(|u| u.unit_name == r.unit_name) {
                Some(idx) => idx,
                None => {
                    report.units.push(UnitTotals {
                        unit_name: r.unit_name.clone(),
                        ..UnitTotals::default()
                    });
                    report.units.len() - 1
                }
            };
            let totals = &mut report.units[idx];
            totals.heat += r.heat_produced;
            totals.cost += r.cost;
            totals.co2 += r.co2;
            totals.electricity_produced += r.electricity_produced.unwrap_or(0.0);
            totals.electricity_consumed += r.electricity_consumed.unwrap_or(0.0);
            totals.active_steps += 1;
        }

        if report.total_heat > 0.0 {
            report.average_cost_per_mwh = report.total_cost / report.total_heat;
        }
        report
    }
}

impl fmt::Display for KpiReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- KPI Report ---")?;
        writeln!(f, "Timesteps:             {}", self.timesteps)?;
        writeln!(
            f,
            "Heat demand:           {:.2} MWh (peak {:.2} MW)",
            self.total_demand, self.peak_demand
        )?;
        writeln!(f, "Heat produced:         {:.2} MWh", self.total_heat)?;
        writeln!(f, "Production cost:       {:.2} DKK", self.total_cost)?;
        writeln!(f, "Average cost:          {:.2} DKK/MWh", self.average_cost_per_mwh)?;
        writeln!(f, "CO2 emitted:           {:.2} kg", self.total_co2)?;
        writeln!(
            f,
            "Electricity:           +{:.2} / -{:.2} MWh",
            self.total_electricity_produced, self.total_electricity_consumed
        )?;
        write!(
            f,
            "Unmet demand:          {:.2} MWh over {} timesteps",
            self.total_unmet, self.shortfall_steps
        )?;
        for u in &self.units {
            write!(
                f,
                "\n  {:<6} {:>9.2} MWh  {:>12.2} DKK  {:>10.2} kg  ({} steps)",
                u.unit_name, u.heat, u.cost, u.co2, u.active_steps
            )?;
        }
        Ok(())
    }
}
