use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::metrics::failure_name;
use crate::AppState;

const METRICS_PREFIX: &str = "/api/metrics";

/// Times every `/api/` request outside `/api/metrics` through the shared
/// collector, and adds two response headers:
///
///   X-Response-Time-Us  — total handler wall time in microseconds
///   Server-Timing       — same value in the standard Server-Timing format
///
/// 5xx responses are recorded under the `"<label> (Error)"` name.
pub async fn timing_middleware(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Response {
    let label = format!("{} {}", req.method(), req.uri().path());
    let tracked = is_tracked(req.uri().path());

    let token = if tracked { state.metrics.start(&label) } else { None };
    let started = Instant::now();
    let mut response = next.run(req).await;
    let elapsed = started.elapsed();

    if tracked {
        if response.status().is_server_error() {
            state.metrics.end(&failure_name(&label), token);
        } else {
            state.metrics.end(&label, token);
        }
    }

    insert_timing_headers(response.headers_mut(), elapsed);
    response
}

/// The metrics routes report on the window, so they never feed it.
fn is_tracked(path: &str) -> bool {
    path.starts_with("/api/") && !path.starts_with(METRICS_PREFIX)
}

fn insert_timing_headers(headers: &mut HeaderMap, elapsed: Duration) {
    if let Ok(val) = elapsed.as_micros().to_string().parse() {
        headers.insert("X-Response-Time-Us", val);
    }

    let server_timing =
        format!("total;dur={:.3}", elapsed.as_secs_f64() * 1000.0);
    if let Ok(val) = server_timing.parse() {
        headers.insert("Server-Timing", val);
    }
}
