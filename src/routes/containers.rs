// Live endpoints: container inventory and disk usage

use axum::{Json, extract::State};
use chrono::Utc;

use super::AppState;
use crate::docker_repo::live::{self, LiveTimeouts};
use crate::error::ApiError;
use crate::models::{ContainerSnapshot, DiskUsage};

/// GET /api/containers: every container the runtime knows, with best-effort health.
pub(super) async fn list_containers(
    State(state): State<AppState>,
) -> Result<Json<Vec<ContainerSnapshot>>, ApiError> {
    let timeouts = LiveTimeouts {
        list: state.config.runtime.list_timeout(),
        inspect: state.config.runtime.inspect_timeout(),
    };
    let snapshots = live::list_snapshots(state.runtime.as_ref(), timeouts, Utc::now()).await?;
    Ok(Json(snapshots))
}

/// GET /api/disk: capacity of the configured root filesystem.
pub(super) async fn disk_usage(State(state): State<AppState>) -> Result<Json<DiskUsage>, ApiError> {
    let usage = state
        .disk_repo
        .get_disk_usage()
        .await
        .map_err(|e| ApiError::FilesystemUnavailable(e.to_string()))?;
    Ok(Json(usage))
}
