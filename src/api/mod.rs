//! Read-only JSON API over completed scenario runs.
//!
//! Endpoints:
//! - `/scenarios`: names, fleet summaries and headline KPIs
//! - `/scenarios/{name}/units`: the scenario's fleet, optionally sorted
//! - `/scenarios/{name}/results`: per-unit results, filterable by unit and time range
//! - `/scenarios/{name}/report`: KPI report and shortfalls
//! - `/scenarios/{name}/hourly`: mean heat per hour of day and unit

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tracing::info;

use crate::runner::ScenarioRun;

pub use types::{
    ErrorResponse, ReportResponse, ResultRecord, ResultsQuery, ScenarioListing, ShortfallRecord,
    UnitsQuery,
};

/// Immutable application state shared across all request handlers.
///
/// Built once after every scenario has run and wrapped in `Arc`; handlers
/// only read it.
pub struct AppState {
    /// Completed runs in configuration order.
    pub runs: Vec<ScenarioRun>,
}

impl AppState {
    pub fn new(runs: Vec<ScenarioRun>) -> Self {
        Self { runs }
    }

    /// Run with the given scenario name.
    pub fn scenario(&self, name: &str) -> Option<&ScenarioRun> {
        self.runs.iter().find(|r| r.name == name)
    }
}

/// Builds the axum router with all API routes.
///
/// # Arguments
///
/// * `state` - Shared application state
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/scenarios", get(handlers::list_scenarios))
        .route("/scenarios/{name}/units", get(handlers::get_units))
        .route("/scenarios/{name}/results", get(handlers::get_results))
        .route("/scenarios/{name}/report", get(handlers::get_report))
        .route("/scenarios/{name}/hourly", get(handlers::get_hourly))
        .with_state(state)
}

/// Binds to the given address and serves the API until the process stops.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind to `addr` or the
/// server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "API server listening");
    axum::serve(listener, app).await
}
