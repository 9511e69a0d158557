//! Route handlers for the `/api` surface.

use crate::AppState;
use crate::error::ApiError;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use panel_application::{HealthStatus, PersonaListing, SegmentCatalog};
use panel_core::PanelError;
use panel_core::result::TestRecord;
use panel_core::survey::HypothesisRequest;
use serde::Serialize;

#[derive(Serialize)]
pub struct ResultsListing {
    pub results: Vec<TestRecord>,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(state.service.health())
}

pub async fn personas(State(state): State<AppState>) -> Json<PersonaListing> {
    Json(state.service.personas())
}

pub async fn segments(State(state): State<AppState>) -> Json<SegmentCatalog> {
    Json(state.service.segments())
}

pub async fn run_test(
    State(state): State<AppState>,
    payload: Result<Json<HypothesisRequest>, JsonRejection>,
) -> Result<Json<TestRecord>, ApiError> {
    let Json(request) = payload.map_err(|rejection| PanelError::invalid_input(rejection.body_text()))?;
    let record = state.service.run_test(&request).await?;
    Ok(Json(record))
}

pub async fn results(State(state): State<AppState>) -> Result<Json<ResultsListing>, ApiError> {
    let results = state.service.results().await?;
    Ok(Json(ResultsListing { results }))
}

pub async fn result(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TestRecord>, ApiError> {
    Ok(Json(state.service.result(&id).await?))
}
