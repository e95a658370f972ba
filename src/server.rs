use axum::{
    middleware as axum_mw,
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::metrics::stream;
use crate::middleware::timing;
use crate::AppState;

/// Builds the full Axum `Router` with all routes and middleware.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // ── Metrics ─────────────────────────────────────────────
        .route(
            "/api/metrics",
            get(stream::get_metrics).delete(stream::clear_metrics),
        )
        .route("/api/metrics/stats", get(stream::get_stats))
        .route("/api/metrics/percentiles", get(stream::get_percentiles))
        .route("/api/metrics/stream", get(stream::metrics_stream))
        // ── Liveness ────────────────────────────────────────────
        .route("/api/health", get(health))
        // ── Global middleware (applied bottom-up) ───────────────
        .layer(axum_mw::from_fn_with_state(
            state.clone(),
            timing::timing_middleware,
        ))
        .layer(CorsLayer::permissive())
        // ── Provide shared state to all routes above ────────────
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
