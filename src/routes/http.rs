// HTTP handlers: version, metric ingest/listing, hosts, chart series

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use super::AppState;
use crate::chart::{self, ChartError};
use crate::models::{ChartMode, ChartView, HostSelector, RawSample};
use crate::version::{NAME, VERSION};

const DEFAULT_METRICS_LIMIT: usize = 200;
const MAX_METRICS_LIMIT: usize = 10_000;

impl IntoResponse for ChartError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (StatusCode::BAD_REQUEST, body).into_response()
    }
}

/// GET /version — service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": NAME,
        "version": VERSION,
    }))
}

#[derive(Debug, Deserialize)]
pub(super) struct MetricsQuery {
    #[serde(default)]
    host: String,
    limit: Option<usize>,
}

/// GET /api/metrics — most recent raw samples, newest first.
pub(super) async fn list_metrics_handler(
    State(state): State<AppState>,
    Query(q): Query<MetricsQuery>,
) -> impl IntoResponse {
    let limit = q
        .limit
        .unwrap_or(DEFAULT_METRICS_LIMIT)
        .clamp(1, MAX_METRICS_LIMIT);
    Json(state.store.recent(&HostSelector::parse(&q.host), limit))
}

/// POST /api/metrics — store samples as received; validation happens at chart time.
/// Body is one sample object or an array of them; malformed elements are stored and later dropped.
pub(super) async fn ingest_metrics_handler(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> impl IntoResponse {
    let samples: Vec<RawSample> = match &body {
        serde_json::Value::Array(items) => items.iter().map(RawSample::from_value).collect(),
        single => vec![RawSample::from_value(single)],
    };
    let accepted = state.store.extend(samples);
    tracing::debug!(operation = "ingest_metrics", accepted, "samples stored");
    (
        StatusCode::ACCEPTED,
        Json(serde_json::json!({ "accepted": accepted })),
    )
}

/// GET /api/hosts — hosts seen in the stored samples, first-seen order.
pub(super) async fn list_hosts_handler(State(state): State<AppState>) -> impl IntoResponse {
    let hosts = chart::list_hosts(&[], &state.store.snapshot());
    Json(serde_json::json!({ "hosts": hosts }))
}

#[derive(Debug, Deserialize)]
pub(super) struct ChartQuery {
    mode: Option<String>,
    #[serde(default)]
    host: String,
}

/// GET /api/chart — series over the stored samples as of now.
pub(super) async fn stored_chart_handler(
    State(state): State<AppState>,
    Query(q): Query<ChartQuery>,
) -> Result<Json<ChartView>, ChartError> {
    let mode = q.mode.as_deref().unwrap_or(ChartMode::Live.as_str());
    let view = chart::chart_view(
        &state.store.snapshot(),
        &[],
        mode,
        &q.host,
        chrono::Utc::now(),
    )?;
    Ok(Json(view))
}

#[derive(Debug, Deserialize)]
pub(super) struct ChartRequest {
    #[serde(default)]
    samples: Vec<RawSample>,
    #[serde(default)]
    hosts: Vec<String>,
    mode: String,
    #[serde(default)]
    host: String,
}

/// POST /api/chart — series over a caller-supplied snapshot; nothing is stored.
pub(super) async fn snapshot_chart_handler(
    Json(req): Json<ChartRequest>,
) -> Result<Json<ChartView>, ChartError> {
    let view = chart::chart_view(
        &req.samples,
        &req.hosts,
        &req.mode,
        &req.host,
        chrono::Utc::now(),
    )?;
    Ok(Json(view))
}
