//! Demand time series input.

pub mod demand;

pub use demand::{DemandFormat, DemandPoint, load_demand, parse_demand, sniff_format};
