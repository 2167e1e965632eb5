//! Production units and the catalogs they are loaded from.

/// Unit catalog file loading.
pub mod catalog;
/// Fleet selection and ordering.
pub mod selection;
pub mod summary;
pub mod unit;

pub use catalog::{load_catalog, load_companion_catalog, parse_catalog};
pub use selection::{SortKey, electric_only, select_units, sort_units};
pub use summary::{CatalogSummary, Comparison, Verdict, compare};
pub use unit::{ElectricRole, ProductionUnit};
