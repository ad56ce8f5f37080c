use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{extract::State, Json};
use cfb_core::{Draft, GateError, Receipt, SubmitError};

use crate::responses::{self, problem_response};
use crate::AppState;

fn map_error(err: SubmitError) -> axum::response::Response {
    let detail = err.to_string();
    match err {
        SubmitError::Gate(GateError::NotConnected) => responses::unauthorized(&detail),
        SubmitError::Gate(GateError::TokenMissing) => {
            problem_response(StatusCode::FORBIDDEN, "Forbidden", Some(&detail))
        }
        SubmitError::Invalid(_) => problem_response(
            StatusCode::BAD_REQUEST,
            "Invalid feedback",
            Some(&detail),
        ),
        SubmitError::InFlight => problem_response(StatusCode::CONFLICT, "Conflict", Some(&detail)),
        SubmitError::Aborted => problem_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Submission Failed",
            Some(&detail),
        ),
    }
}

/// Submit anonymous feedback. Responds once the simulated confirmation
/// delay has elapsed.
#[utoipa::path(
    post,
    path = "/feedback",
    tag = "Feedback",
    request_body = Draft,
    responses(
        (status = 201, description = "Recorded", body = Receipt),
        (status = 400, description = "Invalid draft", body = crate::responses::ProblemDetails),
        (status = 401, description = "Wallet not connected", body = crate::responses::ProblemDetails),
        (status = 403, description = "Opt-in token missing", body = crate::responses::ProblemDetails),
        (status = 409, description = "Submission already in flight", body = crate::responses::ProblemDetails)
    )
)]
pub async fn feedback_submit(
    State(state): State<AppState>,
    Json(draft): Json<Draft>,
) -> impl IntoResponse {
    match state.ctx().submitter().submit(draft).await {
        Ok(receipt) => (StatusCode::CREATED, Json(receipt)).into_response(),
        Err(err) => map_error(err),
    }
}
