//! Watch-info diagnostic handler.
//!
//! Always answers 200. Failures are reported in the body as
//! `{ "ok": false, "error": ... }` since this is a manual inspection tool.

use axum::Json;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::warn;

use crate::state::AppState;

#[derive(Serialize)]
struct DiagFailure {
    ok: bool,
    error: String,
}

/// Echo a preview of the upstream watch-info response for `id`.
pub async fn diagnose(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.relay.diagnose(&id).await {
        Ok(report) => Json(report).into_response(),
        Err(e) => {
            warn!(id = %id, error = %e, "Diagnostic lookup failed");
            Json(DiagFailure {
                ok: false,
                error: e.to_string(),
            })
            .into_response()
        }
    }
}
