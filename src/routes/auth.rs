// Shared-secret bearer check in front of every /api route except health and version.

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use subtle::ConstantTimeEq;

use super::AppState;
use crate::error::ApiError;

/// Rejects with 401 before the handler runs unless the `Authorization` header
/// equals `Bearer <token>` byte for byte.
pub(super) async fn require_auth(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let expected = format!("Bearer {}", state.config.server.token);
    let presented = request
        .headers()
        .get(AUTHORIZATION)
        .map(|v| v.as_bytes())
        .unwrap_or_default();

    if bool::from(presented.ct_eq(expected.as_bytes())) {
        Ok(next.run(request).await)
    } else {
        tracing::debug!(path = %request.uri().path(), "rejected request without valid token");
        Err(ApiError::Unauthorized)
    }
}
