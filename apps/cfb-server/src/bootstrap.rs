use std::net::SocketAddr;

use axum::Router;
use cfb_core::{AppContext, ServerConfig};

use crate::{access_log, router, AppState};

#[derive(Debug, thiserror::Error)]
pub(crate) enum HttpConfigError {
    #[error("invalid bind address {bind}:{port}")]
    InvalidBind { bind: String, port: u16 },
    #[error("max_concurrency must be at least 1")]
    InvalidConcurrency,
}

#[derive(Debug)]
pub(crate) struct HttpConfig {
    pub addr: SocketAddr,
    pub concurrency_limit: usize,
}

pub(crate) fn http_config(server: &ServerConfig) -> Result<HttpConfig, HttpConfigError> {
    if server.max_concurrency == 0 {
        return Err(HttpConfigError::InvalidConcurrency);
    }
    let addr = format!("{}:{}", server.bind, server.port)
        .parse()
        .map_err(|_| HttpConfigError::InvalidBind {
            bind: server.bind.clone(),
            port: server.port,
        })?;
    Ok(HttpConfig {
        addr,
        concurrency_limit: server.max_concurrency,
    })
}

/// Routes bound to state, before HTTP layers.
pub(crate) fn build_app(ctx: AppContext) -> Router<()> {
    let (router, endpoints, endpoints_meta) = router::build_router();
    let state = AppState::new(ctx, endpoints, endpoints_meta);
    router.with_state(state)
}

pub(crate) fn attach_http_layers(router: Router<()>, concurrency_limit: usize) -> Router<()> {
    use tower::limit::ConcurrencyLimitLayer;
    use tower_http::trace::TraceLayer;

    router
        .layer(TraceLayer::new_for_http())
        .layer(ConcurrencyLimitLayer::new(concurrency_limit))
}

pub(crate) fn attach_global_layers(router: Router<()>) -> Router<()> {
    router.layer(axum::middleware::from_fn(access_log::access_log_mw))
}
