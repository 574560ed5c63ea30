// Unauthenticated GET handlers: health, version

use axum::response::IntoResponse;

use crate::version;

/// GET /api/health: liveness probe.
pub(super) async fn health_handler() -> &'static str {
    "ok"
}

/// GET /api/version: service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    axum::Json(version::current())
}
