use axum::response::IntoResponse;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use cfb_core::{Dashboard, FeedbackStatus, StatusFilter};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::responses;
use crate::AppState;

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct DashboardParams {
    /// `all`, `pending`, `reviewed`, or `resolved`.
    pub status: Option<String>,
}

/// Moderation dashboard: counts, category breakdown, filtered records.
#[utoipa::path(
    get,
    path = "/admin",
    tag = "Admin",
    params(DashboardParams),
    responses(
        (status = 200, description = "Dashboard", body = Dashboard),
        (status = 400, description = "Unknown status filter", body = crate::responses::ProblemDetails)
    )
)]
pub async fn admin_dashboard(
    State(state): State<AppState>,
    Query(params): Query<DashboardParams>,
) -> impl IntoResponse {
    let filter = match params.status.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => match raw.parse::<StatusFilter>() {
            Ok(filter) => filter,
            Err(err) => return responses::bad_request(&err.to_string()),
        },
        _ => StatusFilter::All,
    };
    Json(state.ctx().dashboard(filter)).into_response()
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct StatusUpdateRequest {
    pub status: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StatusUpdateResponse {
    pub id: String,
    pub status: FeedbackStatus,
    /// False when the id matched nothing; the request is still a success.
    pub updated: bool,
}

/// Set a record's moderation status. Any status may follow any other.
#[utoipa::path(
    put,
    path = "/admin/feedback/{id}/status",
    tag = "Admin",
    params(("id" = String, Path, description = "Feedback id")),
    request_body = StatusUpdateRequest,
    responses(
        (status = 200, description = "Applied, or no-op for unknown id", body = StatusUpdateResponse),
        (status = 400, description = "Unknown status", body = crate::responses::ProblemDetails)
    )
)]
pub async fn admin_update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<StatusUpdateRequest>,
) -> impl IntoResponse {
    let status = match req.status.parse::<FeedbackStatus>() {
        Ok(status) => status,
        Err(err) => return responses::bad_request(&err.to_string()),
    };
    let updated = state.ctx().set_status(&id, status);
    Json(StatusUpdateResponse {
        id,
        status,
        updated,
    })
    .into_response()
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteResponse {
    pub id: String,
    pub deleted: bool,
}

/// Remove a record. Deleting an absent id succeeds.
#[utoipa::path(
    delete,
    path = "/admin/feedback/{id}",
    tag = "Admin",
    params(("id" = String, Path, description = "Feedback id")),
    responses((status = 200, description = "Removed, or already absent", body = DeleteResponse))
)]
pub async fn admin_delete(State(state): State<AppState>, Path(id): Path<String>) -> impl IntoResponse {
    let deleted = state.ctx().remove(&id);
    Json(DeleteResponse { id, deleted })
}
