#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use tower::ServiceExt;

use admin_telemetry::{server, AppState, Config};

fn dev_state() -> Arc<AppState> {
    let cfg = Config::from_lookup(|k| (k == "APP_ENV").then(|| "development".into()))
        .unwrap();
    Arc::new(AppState::new(cfg))
}

async fn call(app: &Router, method: Method, uri: &str) -> (StatusCode, serde_json::Value) {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

#[tokio::test]
async fn delete_then_get_returns_an_empty_window() {
    let state = dev_state();
    let app = server::create_router(state.clone());

    let (status, _) = call(&app, Method::GET, "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(state.metrics.len(), 1);

    let (status, _) = call(&app, Method::DELETE, "/api/metrics").await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = call(&app, Method::GET, "/api/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["enabled"], true);
    assert_eq!(body["samples"], serde_json::json!([]));
    assert!(state.metrics.snapshot().is_empty());
}

#[tokio::test]
async fn polling_stats_does_not_feed_the_window() {
    let state = dev_state();
    let app = server::create_router(state.clone());

    call(&app, Method::GET, "/api/health").await;
    for _ in 0..5 {
        let (status, body) = call(&app, Method::GET, "/api/metrics/stats").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 1);
    }

    let names: Vec<_> = state.metrics.snapshot().into_iter().map(|s| s.name).collect();
    assert_eq!(names, vec!["GET /api/health"]);
}

#[tokio::test]
async fn stats_for_unknown_name_is_404() {
    let app = server::create_router(dev_state());

    let (status, body) =
        call(&app, Method::GET, "/api/metrics/stats?name=nonexistent-name").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "no data");
}
