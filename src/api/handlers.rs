//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use chrono::NaiveDateTime;

use super::AppState;
use super::types::{
    ErrorResponse, ReportResponse, ResultRecord, ResultsQuery, ScenarioListing, UnitsQuery,
};
use crate::assets::selection::sort_units;
use crate::assets::unit::ProductionUnit;
use crate::io::fields::parse_timestamp;
use crate::runner::ScenarioRun;
use crate::sim::hourly::{HourlyHeatProduction, hourly_production};

type ApiError = (StatusCode, Json<ErrorResponse>);

fn error(status: StatusCode, message: String) -> ApiError {
    (status, Json(ErrorResponse { error: message }))
}

fn find<'a>(state: &'a AppState, name: &str) -> Result<&'a ScenarioRun, ApiError> {
    state
        .scenario(name)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, format!("unknown scenario \"{name}\"")))
}

fn bound(raw: Option<&str>, param: &str) -> Result<Option<NaiveDateTime>, ApiError> {
    raw.map(|value| {
        parse_timestamp(value).ok_or_else(|| {
            error(
                StatusCode::BAD_REQUEST,
                format!("`{param}` (\"{value}\") is not a timestamp"),
            )
        })
    })
    .transpose()
}

/// `GET /scenarios` → 200 + `Vec<ScenarioListing>` JSON
pub async fn list_scenarios(State(state): State<Arc<AppState>>) -> Json<Vec<ScenarioListing>> {
    Json(state.runs.iter().map(ScenarioListing::from).collect())
}

/// Returns the scenario's fleet.
///
/// `GET /scenarios/{name}/units` → 200 + fleet JSON in catalog order
/// `GET /scenarios/{name}/units?sort=co2_emission` → sorted, unknown CO₂ last
pub async fn get_units(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Query(query): Query<UnitsQuery>,
) -> Result<Json<Vec<ProductionUnit>>, ApiError> {
    let run = find(&state, &name)?;
    let mut units = run.units.clone();
    if let Some(key) = query.sort {
        sort_units(&mut units, key);
    }
    Ok(Json(units))
}

/// Returns result rows, optionally filtered by unit and time range.
///
/// `GET /scenarios/{name}/results` → 200 + `Vec<ResultRecord>` JSON
/// `GET /scenarios/{name}/results?unit=GB1&from=..&to=..` → filtered (inclusive)
/// `from` later than `to`, or an unparseable bound → 400 + `ErrorResponse`
pub async fn get_results(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Query(query): Query<ResultsQuery>,
) -> Result<Json<Vec<ResultRecord>>, ApiError> {
    let run = find(&state, &name)?;
    let from = bound(query.from.as_deref(), "from")?;
    let to = bound(query.to.as_deref(), "to")?;

    if let (Some(from), Some(to)) = (from, to) {
        if from > to {
            return Err(error(
                StatusCode::BAD_REQUEST,
                format!("`from` ({from}) must not be later than `to` ({to})"),
            ));
        }
    }

    let records = run
        .run
        .results
        .iter()
        .filter(|r| query.unit.as_ref().is_none_or(|u| &r.unit_name == u))
        .filter(|r| from.is_none_or(|f| r.time >= f))
        .filter(|r| to.is_none_or(|t| r.time <= t))
        .map(ResultRecord::from)
        .collect();

    Ok(Json(records))
}

/// `GET /scenarios/{name}/report` → 200 + `ReportResponse` JSON
pub async fn get_report(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<ReportResponse>, ApiError> {
    let run = find(&state, &name)?;
    Ok(Json(ReportResponse::from(run)))
}

/// `GET /scenarios/{name}/hourly` → 200 + `Vec<HourlyHeatProduction>` JSON
pub async fn get_hourly(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<Vec<HourlyHeatProduction>>, ApiError> {
    let run = find(&state, &name)?;
    Ok(Json(hourly_production(&run.run.results)))
}
