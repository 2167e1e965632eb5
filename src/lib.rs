//! Merit-order heat dispatch over demand time series.

#[cfg(feature = "api")]
pub mod api;
/// Production units, catalog loading, fleet selection and comparison.
pub mod assets;
pub mod cli;
pub mod config;
pub mod error;
/// Result-store persistence and shared field codecs.
pub mod io;
pub mod logging;
pub mod runner;
/// Dispatch engine, KPIs, and hourly aggregation.
pub mod sim;
/// Heat-demand series.
pub mod source;
