use std::convert::Infallible;
use std::time::Duration;

use axum::extract::State;
use axum::response::sse::{Event as SseEvent, KeepAlive, Sse};
use axum::response::IntoResponse;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt as _;
use tracing::debug;

use crate::AppState;

/// Server-Sent Events stream of bus envelopes. Each notice arrives as an
/// event named after its topic.
#[utoipa::path(
    get,
    path = "/events",
    tag = "Events",
    responses(
        (status = 200, description = "SSE stream of notices", content_type = "text/event-stream")
    )
)]
pub async fn events_sse(State(state): State<AppState>) -> impl IntoResponse {
    let rx = state.ctx().bus().subscribe();
    let stream = BroadcastStream::new(rx).filter_map(|item| match item {
        Ok(env) => {
            let data = serde_json::to_string(&env).unwrap_or_else(|_| "{}".into());
            Some(Ok::<_, Infallible>(SseEvent::default().event(env.kind).data(data)))
        }
        Err(lagged) => {
            debug!(target: "http.events", %lagged, "sse subscriber lagged");
            None
        }
    });
    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(10))
            .text("keep-alive"),
    )
}
