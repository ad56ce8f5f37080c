use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use utoipa::ToSchema;

/// RFC 7807 problem body.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProblemDetails {
    pub r#type: String,
    pub title: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

pub fn problem_response(
    status: StatusCode,
    title: &str,
    detail: Option<&str>,
) -> axum::response::Response {
    let body = ProblemDetails {
        r#type: "about:blank".into(),
        title: title.into(),
        status: status.as_u16(),
        detail: detail.map(str::to_string),
    };
    (status, Json(body)).into_response()
}

pub fn bad_request(detail: &str) -> axum::response::Response {
    problem_response(StatusCode::BAD_REQUEST, "Bad Request", Some(detail))
}

pub fn unauthorized(detail: &str) -> axum::response::Response {
    problem_response(StatusCode::UNAUTHORIZED, "Unauthorized", Some(detail))
}
