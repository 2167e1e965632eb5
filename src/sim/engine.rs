//! Merit-order dispatch engine.
//!
//! Each demand point is solved on its own: units are taken in merit order and
//! each covers as much of the remaining demand as its capacity allows. No
//! choice is revisited and no state carries over between timesteps.

use std::path::Path;

use tracing::{debug, info, warn};

use super::types::{DispatchRun, MeritOrder, Shortfall, SimulatedResult, StepOutcome};
use crate::assets::catalog::load_companion_catalog;
use crate::assets::selection::cmp_known_first;
use crate::assets::unit::{ElectricRole, ProductionUnit};
use crate::error::Result;
use crate::source::demand::{DemandPoint, load_demand};

/// Dispatch engine owning a ranked fleet and the demand series to serve.
pub struct Engine {
    /// Units in merit order.
    units: Vec<ProductionUnit>,
    demand: Vec<DemandPoint>,
}

impl Engine {
    /// Creates an engine, ranking `units` by `order`.
    ///
    /// Ranking is a stable sort, so units with equal keys keep their input order.
    pub fn new(units: Vec<ProductionUnit>, demand: Vec<DemandPoint>, order: MeritOrder) -> Self {
        Self {
            units: rank(units, order),
            demand,
        }
    }

    /// Builds an engine from a demand file and the catalog stored next to it.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::CatalogNotFound`] when `catalog_file` is
    /// not in the demand file's directory, or a read error for either file.
    pub fn from_demand_file(demand_path: &Path, catalog_file: &str, order: MeritOrder) -> Result<Self> {
        let units = load_companion_catalog(demand_path, catalog_file)?.records;
        let demand = load_demand(demand_path)?.records;
        info!(
            units = units.len(),
            points = demand.len(),
            "loaded dispatch inputs"
        );
        Ok(Self::new(units, demand, order))
    }

    /// Allocates one demand point across the ranked fleet.
    pub fn step(&self, point: &DemandPoint) -> StepOutcome {
        let mut results = Vec::new();
        let mut remaining = point.demand;
        let mut supplied = 0.0;
        // rounding residue left after summing the contributions
        let tolerance =
            f64::EPSILON * point.demand.abs().max(1.0) * self.units.len().max(1) as f64;

        for unit in &self.units {
            if remaining <= tolerance {
                break;
            }
            let contribution = unit.max_heat.min(remaining);
            if contribution <= 0.0 {
                continue;
            }
            results.push(contribute(point, unit, contribution));
            remaining -= contribution;
            supplied += contribution;
        }

        let unmet = point.demand - supplied;
        let shortfall = (unmet > tolerance).then(|| Shortfall {
            time: point.time,
            demand: point.demand,
            unmet,
        });

        StepOutcome { results, shortfall }
    }

    /// Dispatches every demand point in order.
    pub fn run(&self) -> DispatchRun {
        let mut run = DispatchRun::default();
        for point in &self.demand {
            let outcome = self.step(point);
            if let Some(shortfall) = outcome.shortfall {
                warn!(
                    time = %shortfall.time,
                    demand = shortfall.demand,
                    unmet = shortfall.unmet,
                    "demand exceeds fleet capacity"
                );
                run.shortfalls.push(shortfall);
            }
            run.results.extend(outcome.results);
        }
        debug!(
            results = run.results.len(),
            shortfalls = run.shortfalls.len(),
            "dispatch complete"
        );
        run
    }

    /// Units in the order they are dispatched.
    pub fn units(&self) -> &[ProductionUnit] {
        &self.units
    }

    pub fn demand(&self) -> &[DemandPoint] {
        &self.demand
    }
}

/// Dispatches `demand` over `units` in ascending production-cost order.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use heat_optimizer::assets::ProductionUnit;
/// use heat_optimizer::sim::engine::dispatch;
/// use heat_optimizer::source::DemandPoint;
///
/// let t = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// let units = vec![
///     ProductionUnit::new("GB1", 4.0, 520.0),
///     ProductionUnit::new("HP1", 6.0, 300.0),
/// ];
/// let run = dispatch(&units, &[DemandPoint::new(t, 8.0)]);
///
/// assert_eq!(run.results[0].unit_name, "HP1");
/// assert_eq!(run.results[0].heat_produced, 6.0);
/// assert_eq!(run.results[1].unit_name, "GB1");
/// assert_eq!(run.results[1].heat_produced, 2.0);
/// ```
pub fn dispatch(units: &[ProductionUnit], demand: &[DemandPoint]) -> DispatchRun {
    Engine::new(units.to_vec(), demand.to_vec(), MeritOrder::Cost).run()
}

fn rank(mut units: Vec<ProductionUnit>, order: MeritOrder) -> Vec<ProductionUnit> {
    match order {
        MeritOrder::Cost => units.sort_by(|a, b| a.production_cost.total_cmp(&b.production_cost)),
        MeritOrder::Emissions => units.sort_by(|a, b| cmp_known_first(a.co2_emission, b.co2_emission)),
    }
    units
}

fn contribute(point: &DemandPoint, unit: &ProductionUnit, heat: f64) -> SimulatedResult {
    let load_factor = heat / unit.max_heat;
    let (electricity_produced, electricity_consumed) = match unit.electric_role() {
        ElectricRole::Producer(capacity) => (Some(capacity * load_factor), None),
        ElectricRole::Consumer(capacity) => (None, Some(capacity * load_factor)),
        ElectricRole::None => (None, None),
    };

    SimulatedResult {
        time: point.time,
        unit_name: unit.name.clone(),
        heat_produced: heat,
        cost: heat * unit.production_cost,
        co2: heat * unit.co2_or_zero(),
        electricity_produced,
        electricity_consumed,
    }
}
