// HTTP routes

mod auth;
mod containers;
mod history;
mod http;

use axum::{Router, middleware, routing::get};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::config::AppConfig;
use crate::disk_repo::DiskRepo;
use crate::docker_repo::ContainerRuntime;
use crate::metrics_repo::{MetricsRepo, RenderOptions};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) metrics_repo: Arc<MetricsRepo>,
    pub(crate) runtime: Arc<dyn ContainerRuntime>,
    pub(crate) disk_repo: Arc<DiskRepo>,
    pub(crate) config: AppConfig,
}

impl AppState {
    /// Diagnostic mode adds human-readable timestamps to history rows.
    pub(crate) fn render_options(&self) -> RenderOptions {
        RenderOptions {
            human_friendly_time: self.config.server.debug,
        }
    }
}

pub fn app(
    metrics_repo: Arc<MetricsRepo>,
    runtime: Arc<dyn ContainerRuntime>,
    disk_repo: Arc<DiskRepo>,
    config: AppConfig,
) -> Router {
    let state = AppState {
        metrics_repo,
        runtime,
        disk_repo,
        config,
    };

    let protected = Router::new()
        .route("/api/containers", get(containers::list_containers)) // GET /api/containers
        .route("/api/disk", get(containers::disk_usage)) // GET /api/disk
        .route(
            "/api/container/{container_id}/cpu/history",
            get(history::cpu_history),
        ) // GET /api/container/:id/cpu/history
        .route(
            "/api/container/{container_id}/memory/history",
            get(history::memory_history),
        ) // GET /api/container/:id/memory/history
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_auth,
        ));

    Router::new()
        .route("/api/health", get(http::health_handler)) // GET /api/health
        .route("/api/version", get(http::version_handler)) // GET /api/version
        .merge(protected)
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
