//! Quote endpoint handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::time::Instant;

use crate::http::server::AppState;
use crate::observability::metrics;
use crate::resilience::Deadline;

/// Body sent when the upstream tier fails. Upstream detail stays in the logs.
pub const UPSTREAM_FAILURE_BODY: &str = "failed to fetch quote";

/// `GET <quote path>`: run the cascade and answer with the bid as a JSON string.
pub async fn get_quote(State(state): State<AppState>) -> Response {
    let start = Instant::now();
    let deadline = Deadline::after(state.engine.timeouts().request());

    match state.engine.run(deadline).await {
        Ok(outcome) => {
            tracing::info!(
                bid = %outcome.bid(),
                persisted = outcome.record_id().is_some(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Quote served"
            );
            metrics::record_request("ok", start);
            (StatusCode::OK, Json(outcome.bid().to_string())).into_response()
        }
        Err(_) => {
            metrics::record_request("upstream_error", start);
            (StatusCode::INTERNAL_SERVER_ERROR, UPSTREAM_FAILURE_BODY).into_response()
        }
    }
}

pub async fn health() -> &'static str {
    "ok"
}
