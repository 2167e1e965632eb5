//! Picking and ordering the units that make up a scenario's fleet.

use std::cmp::Ordering;

use serde::Deserialize;
use tracing::warn;

use super::unit::ProductionUnit;

/// Display ordering for unit lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Name,
    ProductionCost,
    /// Ascending CO₂ factor, units with an unknown factor last.
    Co2Emission,
}

/// Keeps catalog units named in `names`, in catalog order.
///
/// An empty `names` keeps the whole catalog. Names that match no unit are logged.
pub fn select_units(catalog: &[ProductionUnit], names: &[String]) -> Vec<ProductionUnit> {
    if names.is_empty() {
        return catalog.to_vec();
    }

    for name in names {
        if !catalog.iter().any(|u| &u.name == name) {
            warn!(unit = %name, "selected unit is not in the catalog");
        }
    }

    catalog
        .iter()
        .filter(|u| names.contains(&u.name))
        .cloned()
        .collect()
}

/// Keeps only units that co-generate electricity.
pub fn electric_only(units: Vec<ProductionUnit>) -> Vec<ProductionUnit> {
    units
        .into_iter()
        .filter(ProductionUnit::produces_electricity)
        .collect()
}

/// Stable sort of `units` by `key`.
pub fn sort_units(units: &mut [ProductionUnit], key: SortKey) {
    match key {
        SortKey::Name => units.sort_by(|a, b| a.name.cmp(&b.name)),
        SortKey::ProductionCost => {
            units.sort_by(|a, b| a.production_cost.total_cmp(&b.production_cost));
        }
        SortKey::Co2Emission => units.sort_by(|a, b| cmp_known_first(a.co2_emission, b.co2_emission)),
    }
}

/// Orders known values ascending, with unknown values after all known ones.
pub(crate) fn cmp_known_first(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
