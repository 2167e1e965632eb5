/// Merit-order dispatch engine.
pub mod engine;
pub mod hourly;
pub mod kpi;
pub mod types;
