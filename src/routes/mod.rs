// HTTP routes

mod http;

use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::sample_store::SampleStore;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) store: Arc<SampleStore>,
}

pub fn app(store: Arc<SampleStore>) -> Router {
    let state = AppState { store };
    Router::new()
        .route("/", get(|| async { "hostpulse: host metrics chart service" })) // GET /
        .route("/version", get(http::version_handler)) // GET /version
        .route(
            "/api/metrics",
            get(http::list_metrics_handler).post(http::ingest_metrics_handler),
        ) // GET, POST /api/metrics
        .route("/api/hosts", get(http::list_hosts_handler)) // GET /api/hosts
        .route(
            "/api/chart",
            get(http::stored_chart_handler).post(http::snapshot_chart_handler),
        ) // GET, POST /api/chart
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
