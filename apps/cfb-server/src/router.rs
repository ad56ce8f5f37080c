use std::mem;

use axum::{
    handler::Handler,
    routing::{delete, get, post, put},
    Router,
};
use serde_json::{json, Value};

use crate::{api, AppState};

#[derive(Copy, Clone)]
pub(crate) enum Stability {
    Stable,
    Beta,
}

impl Stability {
    fn as_str(self) -> &'static str {
        match self {
            Stability::Stable => "stable",
            Stability::Beta => "beta",
        }
    }
}

pub(crate) struct RouterBuilder {
    router: Router<AppState>,
    endpoints: Vec<String>,
    endpoints_meta: Vec<Value>,
}

impl RouterBuilder {
    pub fn new() -> Self {
        Self {
            router: Router::new(),
            endpoints: Vec::new(),
            endpoints_meta: Vec::new(),
        }
    }

    fn record(&mut self, method: &str, path: &'static str, stability: Stability) {
        self.endpoints.push(format!("{} {}", method, path));
        self.endpoints_meta.push(json!({
            "method": method,
            "path": path,
            "stability": stability.as_str(),
        }));
    }

    pub fn route_get<H, T>(&mut self, path: &'static str, handler: H, stability: Stability) -> &mut Self
    where
        H: Handler<T, AppState> + Clone + 'static,
        T: Send + 'static,
    {
        self.record("GET", path, stability);
        let router = mem::take(&mut self.router);
        self.router = router.route(path, get(handler));
        self
    }

    pub fn route_post<H, T>(&mut self, path: &'static str, handler: H, stability: Stability) -> &mut Self
    where
        H: Handler<T, AppState> + Clone + 'static,
        T: Send + 'static,
    {
        self.record("POST", path, stability);
        let router = mem::take(&mut self.router);
        self.router = router.route(path, post(handler));
        self
    }

    pub fn route_put<H, T>(&mut self, path: &'static str, handler: H, stability: Stability) -> &mut Self
    where
        H: Handler<T, AppState> + Clone + 'static,
        T: Send + 'static,
    {
        self.record("PUT", path, stability);
        let router = mem::take(&mut self.router);
        self.router = router.route(path, put(handler));
        self
    }

    pub fn route_delete<H, T>(
        &mut self,
        path: &'static str,
        handler: H,
        stability: Stability,
    ) -> &mut Self
    where
        H: Handler<T, AppState> + Clone + 'static,
        T: Send + 'static,
    {
        self.record("DELETE", path, stability);
        let router = mem::take(&mut self.router);
        self.router = router.route(path, delete(handler));
        self
    }

    pub fn build(self) -> (Router<AppState>, Vec<String>, Vec<Value>) {
        (self.router, self.endpoints, self.endpoints_meta)
    }
}

pub(crate) mod paths {
    pub const HEALTHZ: &str = "/healthz";
    pub const ABOUT: &str = "/about";
    pub const LANDING: &str = "/";
    pub const EVENTS: &str = "/events";
    pub const SPEC_OPENAPI: &str = "/spec/openapi.json";
    pub const SESSION: &str = "/session";
    pub const SESSION_CONNECT: &str = "/session/connect";
    pub const SESSION_DISCONNECT: &str = "/session/disconnect";
    pub const FEEDBACK: &str = "/feedback";
    pub const BOARD: &str = "/board";
    pub const BOARD_VOTE: &str = "/board/{id}/vote";
    pub const ADMIN: &str = "/admin";
    pub const ADMIN_FEEDBACK_STATUS: &str = "/admin/feedback/{id}/status";
    pub const ADMIN_FEEDBACK_ID: &str = "/admin/feedback/{id}";
}

pub(crate) fn build_router() -> (Router<AppState>, Vec<String>, Vec<Value>) {
    let mut builder = RouterBuilder::new();
    builder
        .route_get(paths::HEALTHZ, api::meta::healthz, Stability::Stable)
        .route_get(paths::ABOUT, api::meta::about, Stability::Stable)
        .route_get(paths::LANDING, api::meta::landing, Stability::Stable)
        .route_get(paths::SPEC_OPENAPI, api::meta::spec_openapi, Stability::Stable)
        .route_get(paths::EVENTS, api::events::events_sse, Stability::Beta);
    builder
        .route_get(paths::SESSION, api::session::session_state, Stability::Stable)
        .route_post(paths::SESSION_CONNECT, api::session::session_connect, Stability::Stable)
        .route_post(
            paths::SESSION_DISCONNECT,
            api::session::session_disconnect,
            Stability::Stable,
        );
    builder
        .route_post(paths::FEEDBACK, api::feedback::feedback_submit, Stability::Stable)
        .route_get(paths::BOARD, api::board::board_list, Stability::Stable)
        .route_post(paths::BOARD_VOTE, api::board::board_vote, Stability::Stable);
    builder
        .route_get(paths::ADMIN, api::admin::admin_dashboard, Stability::Stable)
        .route_put(
            paths::ADMIN_FEEDBACK_STATUS,
            api::admin::admin_update_status,
            Stability::Stable,
        )
        .route_delete(
            paths::ADMIN_FEEDBACK_ID,
            api::admin::admin_delete,
            Stability::Stable,
        );
    builder.build()
}
