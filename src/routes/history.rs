// Windowed CPU / memory history for one container

use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
};
use chrono::Utc;
use serde::Deserialize;

use super::AppState;
use crate::error::ApiError;
use crate::models::{CpuSample, MemorySample};
use crate::sanitize::sanitize_container_id;
use crate::time_window::TimeWindow;

/// `?from=...&to=...` in the wire time format; both optional.
#[derive(Debug, Deserialize)]
pub(super) struct HistoryParams {
    from: Option<String>,
    to: Option<String>,
}

type HistoryQuery = Result<Query<HistoryParams>, QueryRejection>;

/// Sanitized id and defaulted window. Fails before any storage access on a bad boundary.
fn resolve(raw_id: &str, params: &HistoryParams) -> Result<(String, TimeWindow), ApiError> {
    let container_id = sanitize_container_id(raw_id);
    let window =
        TimeWindow::parse(params.from.as_deref(), params.to.as_deref())?.with_defaults(Utc::now());
    tracing::debug!(
        container_id = %container_id,
        from = window.from.as_ref().map(|b| b.raw.as_str()),
        to = window.to.as_ref().map(|b| b.raw.as_str()),
        "history request"
    );
    Ok((container_id, window))
}

/// GET /api/container/{container_id}/cpu/history
pub(super) async fn cpu_history(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    query: HistoryQuery,
) -> Result<Json<Vec<CpuSample>>, ApiError> {
    let Query(params) = query.map_err(|e| ApiError::InvalidQuery(e.body_text()))?;
    let (container_id, window) = resolve(&raw_id, &params)?;
    let samples = state
        .metrics_repo
        .cpu_history(&container_id, &window, state.render_options())
        .await?;
    Ok(Json(samples))
}

/// GET /api/container/{container_id}/memory/history
pub(super) async fn memory_history(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    query: HistoryQuery,
) -> Result<Json<Vec<MemorySample>>, ApiError> {
    let Query(params) = query.map_err(|e| ApiError::InvalidQuery(e.body_text()))?;
    let (container_id, window) = resolve(&raw_id, &params)?;
    let samples = state
        .metrics_repo
        .memory_history(&container_id, &window, state.render_options())
        .await?;
    Ok(Json(samples))
}
