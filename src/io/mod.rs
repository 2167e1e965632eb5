//! Delimited-text persistence: field codecs, simulated-result files, and scenario snapshots.

pub mod fields;
pub mod simulated;
pub mod store;

pub use simulated::{load_simulated, parse_simulated, save_simulated, write_simulated};
pub use store::ResultStore;
