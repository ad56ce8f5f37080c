use std::time::Instant;

use axum::extract::MatchedPath;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use tracing::info;

/// One `http.access` event per request. The rolling writer in `cfb-otel`
/// picks these up when enabled.
pub async fn access_log_mw(req: Request<axum::body::Body>, next: Next) -> Response {
    let started = Instant::now();
    let method = req.method().clone();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());
    let res = next.run(req).await;
    let dur_ms = started.elapsed().as_millis() as u64;
    info!(
        target: cfb_otel::ACCESS_TARGET,
        method = method.as_str(),
        path = %path,
        status = res.status().as_u16(),
        dur_ms,
        "request"
    );
    res
}
