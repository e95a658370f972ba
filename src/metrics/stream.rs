use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;
use tokio_stream::wrappers::IntervalStream;
use tokio_stream::StreamExt;

use super::{PercentileSet, Sample, Stats, CAPACITY};
use crate::error::AppError;
use crate::AppState;

/// Optional exact-match filter on the sample name.
#[derive(Debug, Default, Deserialize)]
pub struct NameFilter {
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SnapshotResponse {
    pub enabled: bool,
    pub capacity: usize,
    pub samples: Vec<Sample>,
}

// ─── GET /api/metrics ────────────────────────────────────────────
/// Full copy of the retained window.

pub async fn get_metrics(
    State(state): State<Arc<AppState>>,
) -> Json<SnapshotResponse> {
    Json(SnapshotResponse {
        enabled: state.metrics.is_enabled(),
        capacity: CAPACITY,
        samples: state.metrics.snapshot(),
    })
}

// ─── GET /api/metrics/stats?name= ────────────────────────────────

pub async fn get_stats(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<NameFilter>,
) -> Result<Json<Stats>, AppError> {
    state
        .metrics
        .statistics(filter.name.as_deref())
        .map(Json)
        .ok_or_else(|| AppError::NotFound("no data".into()))
}

// ─── GET /api/metrics/percentiles?name= ──────────────────────────

pub async fn get_percentiles(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<NameFilter>,
) -> Result<Json<PercentileSet>, AppError> {
    state
        .metrics
        .percentiles(filter.name.as_deref())
        .map(Json)
        .ok_or_else(|| AppError::NotFound("no data".into()))
}

// ─── DELETE /api/metrics ─────────────────────────────────────────

pub async fn clear_metrics(State(state): State<Arc<AppState>>) -> StatusCode {
    state.metrics.clear();
    tracing::info!("metrics window cleared");
    StatusCode::NO_CONTENT
}

// ─── GET /api/metrics/stream ─────────────────────────────────────
/// Server-Sent Events endpoint.
/// Pushes overall `Stats` (or `null` when the window is empty) every tick.

pub async fn metrics_stream(
    State(state): State<Arc<AppState>>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, Infallible>>> {
    let interval = tokio::time::interval(state.config.stream_interval);

    let stream = IntervalStream::new(interval).map(move |_| {
        let stats = state.metrics.statistics(None);
        let json = serde_json::to_string(&stats).unwrap_or_default();
        Ok(Event::default().data(json))
    });

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}
