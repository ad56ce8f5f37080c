use std::sync::Arc;

use cfb_core::AppContext;
use serde_json::Value;

/// Router state: the provided containers plus the endpoint index for `/about`.
#[derive(Clone)]
pub(crate) struct AppState {
    ctx: AppContext,
    pub endpoints: Arc<Vec<String>>,
    pub endpoints_meta: Arc<Vec<Value>>,
}

impl AppState {
    pub fn new(ctx: AppContext, endpoints: Vec<String>, endpoints_meta: Vec<Value>) -> Self {
        Self {
            ctx,
            endpoints: Arc::new(endpoints),
            endpoints_meta: Arc::new(endpoints_meta),
        }
    }

    pub fn ctx(&self) -> &AppContext {
        &self.ctx
    }
}
