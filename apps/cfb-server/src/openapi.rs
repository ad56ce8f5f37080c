use cfb_core::{
    BoardStats, BoardView, Category, CategoryShare, Dashboard, DashboardStats, Draft,
    FeedbackRecord, FeedbackStatus, Receipt, SessionState, SortOrder, StatusFilter, VoteChange,
};
use utoipa::{OpenApi, ToSchema};

#[allow(dead_code)]
#[derive(ToSchema)]
pub struct HealthOk {
    pub ok: bool,
}

#[allow(dead_code)]
#[derive(ToSchema)]
pub struct HttpInfo {
    pub bind: String,
    pub port: u16,
}

#[allow(dead_code)]
#[derive(ToSchema)]
pub struct AboutCounts {
    pub total: usize,
}

#[allow(dead_code)]
#[derive(ToSchema)]
pub struct AboutResponse {
    pub service: String,
    pub version: String,
    pub http: HttpInfo,
    pub counts: AboutCounts,
    #[schema(example = json!(["GET /healthz", "GET /about"]))]
    pub endpoints: Vec<String>,
    #[schema(value_type = Vec<serde_json::Value>)]
    pub endpoints_meta: Vec<serde_json::Value>,
}

#[allow(dead_code)]
#[derive(ToSchema)]
pub struct LandingResponse {
    pub stats: BoardStats,
    #[schema(example = json!(["Academics", "Infrastructure"]))]
    pub categories: Vec<String>,
    pub session: SessionState,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::meta::healthz,
        crate::api::meta::about,
        crate::api::meta::landing,
        crate::api::meta::spec_openapi,
        crate::api::events::events_sse,
        crate::api::session::session_state,
        crate::api::session::session_connect,
        crate::api::session::session_disconnect,
        crate::api::feedback::feedback_submit,
        crate::api::board::board_list,
        crate::api::board::board_vote,
        crate::api::admin::admin_dashboard,
        crate::api::admin::admin_update_status,
        crate::api::admin::admin_delete,
    ),
    components(schemas(
        HealthOk,
        HttpInfo,
        AboutCounts,
        AboutResponse,
        LandingResponse,
        crate::responses::ProblemDetails,
        crate::api::board::VoteResponse,
        crate::api::admin::StatusUpdateRequest,
        crate::api::admin::StatusUpdateResponse,
        crate::api::admin::DeleteResponse,
        BoardStats,
        BoardView,
        Category,
        CategoryShare,
        Dashboard,
        DashboardStats,
        Draft,
        FeedbackRecord,
        FeedbackStatus,
        Receipt,
        SessionState,
        SortOrder,
        StatusFilter,
        VoteChange,
    )),
    tags(
        (name = "Meta", description = "Health, metadata, and the landing summary"),
        (name = "Session", description = "Simulated wallet session"),
        (name = "Feedback", description = "Anonymous submission"),
        (name = "Board", description = "Public board and voting"),
        (name = "Admin", description = "Moderation dashboard"),
        (name = "Events", description = "Notice stream")
    )
)]
pub struct ApiDoc;
