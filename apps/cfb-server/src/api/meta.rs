use axum::response::IntoResponse;
use axum::{extract::State, Json};
use cfb_core::Category;
use serde_json::json;
use utoipa::OpenApi;

use crate::AppState;

/// Health probe.
#[utoipa::path(
    get,
    path = "/healthz",
    tag = "Meta",
    responses(
        (status = 200, description = "Service healthy", body = crate::openapi::HealthOk)
    )
)]
pub async fn healthz() -> impl IntoResponse {
    Json(json!({"ok": true}))
}

/// Service metadata and endpoints index.
#[utoipa::path(
    get,
    path = "/about",
    tag = "Meta",
    responses(
        (status = 200, description = "Service metadata", body = crate::openapi::AboutResponse)
    )
)]
pub async fn about(State(state): State<AppState>) -> impl IntoResponse {
    let server = &state.ctx().config().server;
    let endpoints = state.endpoints.as_ref().clone();
    let endpoints_meta = state.endpoints_meta.as_ref().clone();
    Json(json!({
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "http": {"bind": server.bind, "port": server.port},
        "counts": {"total": endpoints.len()},
        "endpoints": endpoints,
        "endpoints_meta": endpoints_meta,
    }))
}

/// Landing summary: headline stats, categories, and the session.
#[utoipa::path(
    get,
    path = "/",
    tag = "Meta",
    responses(
        (status = 200, description = "Landing summary", body = crate::openapi::LandingResponse)
    )
)]
pub async fn landing(State(state): State<AppState>) -> impl IntoResponse {
    let ctx = state.ctx();
    let stats = cfb_core::board::stats(ctx.feedback_store().read().records());
    let categories: Vec<&str> = Category::ALL.iter().map(|c| c.label()).collect();
    Json(json!({
        "stats": stats,
        "categories": categories,
        "session": ctx.session_state(),
    }))
}

/// Generated OpenAPI document.
#[utoipa::path(
    get,
    path = "/spec/openapi.json",
    tag = "Meta",
    responses((status = 200, description = "OpenAPI document", body = serde_json::Value))
)]
pub async fn spec_openapi() -> impl IntoResponse {
    Json(crate::openapi::ApiDoc::openapi())
}
