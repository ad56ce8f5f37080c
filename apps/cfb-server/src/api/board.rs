use axum::response::IntoResponse;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use cfb_core::{
    BoardQuery, BoardView, Category, FeedbackRecord, FeedbackStatus, SortOrder, VoteChange,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::responses;
use crate::AppState;

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct BoardParams {
    /// Case-insensitive match on title, message, or category.
    pub q: Option<String>,
    /// Category label, or `All`.
    pub category: Option<String>,
    /// `pending`, `reviewed`, `resolved`, or `all`.
    pub status: Option<String>,
    /// `votes`, `newest`, or `oldest`.
    pub sort: Option<String>,
}

fn is_all(raw: &str) -> bool {
    let raw = raw.trim();
    raw.is_empty() || raw.eq_ignore_ascii_case("all")
}

impl BoardParams {
    fn into_query(self, default_sort: SortOrder) -> Result<BoardQuery, String> {
        let category = match self.category.as_deref() {
            Some(raw) if !is_all(raw) => Some(raw.parse::<Category>().map_err(|e| e.to_string())?),
            _ => None,
        };
        let status = match self.status.as_deref() {
            Some(raw) if !is_all(raw) => {
                Some(raw.parse::<FeedbackStatus>().map_err(|e| e.to_string())?)
            }
            _ => None,
        };
        let sort = match self.sort.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => raw.parse::<SortOrder>().map_err(|e| e.to_string())?,
            _ => default_sort,
        };
        Ok(BoardQuery {
            search: self.q,
            category,
            status,
            sort,
        })
    }
}

/// Public board with search, filters, and sorting.
#[utoipa::path(
    get,
    path = "/board",
    tag = "Board",
    params(BoardParams),
    responses(
        (status = 200, description = "Filtered board", body = BoardView),
        (status = 400, description = "Unknown filter value", body = crate::responses::ProblemDetails)
    )
)]
pub async fn board_list(
    State(state): State<AppState>,
    Query(params): Query<BoardParams>,
) -> impl IntoResponse {
    let ctx = state.ctx();
    match params.into_query(ctx.config().board.default_sort) {
        Ok(query) => Json(ctx.board(&query)).into_response(),
        Err(detail) => responses::bad_request(&detail),
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VoteResponse {
    /// `None` when the id matched nothing.
    pub change: Option<VoteChange>,
    pub record: Option<FeedbackRecord>,
}

/// Toggle the session's vote on one record.
#[utoipa::path(
    post,
    path = "/board/{id}/vote",
    tag = "Board",
    params(("id" = String, Path, description = "Feedback id")),
    responses(
        (status = 200, description = "Vote toggled, or no-op for unknown id", body = VoteResponse),
        (status = 401, description = "Wallet not connected", body = crate::responses::ProblemDetails)
    )
)]
pub async fn board_vote(State(state): State<AppState>, Path(id): Path<String>) -> impl IntoResponse {
    let ctx = state.ctx();
    match ctx.cast_vote(&id) {
        Ok(change) => Json(VoteResponse {
            change,
            record: ctx.feedback(&id),
        })
        .into_response(),
        Err(err) => responses::unauthorized(&err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_map_all_to_no_filter() {
        let params = BoardParams {
            q: Some("wifi".into()),
            category: Some("All".into()),
            status: Some("all".into()),
            sort: None,
        };
        let query = params.into_query(SortOrder::Newest).expect("query");
        assert_eq!(query.category, None);
        assert_eq!(query.status, None);
        assert_eq!(query.sort, SortOrder::Newest);
        assert_eq!(query.search.as_deref(), Some("wifi"));
    }

    #[test]
    fn params_reject_unknown_values() {
        let params = BoardParams {
            category: Some("Parking".into()),
            ..Default::default()
        };
        assert!(params.into_query(SortOrder::Votes).is_err());

        let params = BoardParams {
            category: Some("campus life".into()),
            status: Some("Resolved".into()),
            sort: Some("oldest".into()),
            ..Default::default()
        };
        let query = params.into_query(SortOrder::Votes).expect("query");
        assert_eq!(query.category, Some(Category::CampusLife));
        assert_eq!(query.status, Some(FeedbackStatus::Resolved));
        assert_eq!(query.sort, SortOrder::Oldest);
    }
}
