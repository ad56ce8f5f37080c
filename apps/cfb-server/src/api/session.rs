use axum::response::IntoResponse;
use axum::{extract::State, Json};
use cfb_core::SessionState;

use crate::AppState;

/// Current simulated wallet session.
#[utoipa::path(
    get,
    path = "/session",
    tag = "Session",
    responses((status = 200, description = "Session state", body = SessionState))
)]
pub async fn session_state(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.ctx().session_state())
}

/// Connect with a mock address. Reconnecting picks a fresh one.
#[utoipa::path(
    post,
    path = "/session/connect",
    tag = "Session",
    responses((status = 200, description = "Connected", body = SessionState))
)]
pub async fn session_connect(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.ctx().connect())
}

#[utoipa::path(
    post,
    path = "/session/disconnect",
    tag = "Session",
    responses((status = 200, description = "Disconnected", body = SessionState))
)]
pub async fn session_disconnect(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.ctx().disconnect())
}
