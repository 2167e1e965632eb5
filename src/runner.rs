//! End-to-end scenario runs: companion catalog, fleet selection, demand, dispatch, report.

use tracing::{info, warn};

use crate::assets::catalog::load_companion_catalog;
use crate::assets::selection::{electric_only, select_units};
use crate::assets::summary::CatalogSummary;
use crate::assets::unit::ProductionUnit;
use crate::config::{DataConfig, ScenarioConfig};
use crate::error::Result;
use crate::sim::engine::Engine;
use crate::sim::kpi::KpiReport;
use crate::sim::types::DispatchRun;
use crate::source::demand::{DemandPoint, load_demand};

/// Outcome of one configured scenario.
#[derive(Debug, Clone)]
pub struct ScenarioRun {
    pub name: String,
    /// Fleet after selection, in catalog order.
    pub units: Vec<ProductionUnit>,
    pub demand: Vec<DemandPoint>,
    pub run: DispatchRun,
    pub kpi: KpiReport,
    /// Static totals of the fleet, independent of demand.
    pub summary: CatalogSummary,
}

/// Runs one scenario against the files under `data.dir`.
///
/// # Errors
///
/// Returns [`crate::error::Error::CatalogNotFound`] when the catalog is not
/// next to the scenario's demand file, or a read error for either file.
pub fn run_scenario(data: &DataConfig, scenario: &ScenarioConfig) -> Result<ScenarioRun> {
    let demand_path = data.demand_path(scenario);
    let catalog = load_companion_catalog(&demand_path, &data.catalog_file)?.records;

    let mut units = select_units(&catalog, &scenario.units);
    if scenario.electric_only {
        units = electric_only(units);
    }
    if units.is_empty() {
        warn!(scenario = %scenario.name, "fleet is empty, all demand will be unmet");
    }

    let demand = load_demand(&demand_path)?.records;
    let engine = Engine::new(units.clone(), demand, scenario.merit_order);
    let run = engine.run();
    let kpi = KpiReport::from_run(&run, engine.demand());

    info!(
        scenario = %scenario.name,
        units = units.len(),
        points = engine.demand().len(),
        total_cost = kpi.total_cost,
        unmet = kpi.total_unmet,
        "scenario dispatched"
    );

    Ok(ScenarioRun {
        name: scenario.name.clone(),
        summary: CatalogSummary::from_units(&units),
        units,
        demand: engine.demand().to_vec(),
        run,
        kpi,
    })
}

/// Runs every scenario in order, stopping at the first failure.
///
/// # Errors
///
/// Propagates the first error returned by [`run_scenario`].
pub fn run_all(data: &DataConfig, scenarios: &[ScenarioConfig]) -> Result<Vec<ScenarioRun>> {
    scenarios.iter().map(|s| run_scenario(data, s)).collect()
}
