//! Health endpoint

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::state::AppState;

/// GET /healthz - liveness plus the current upstream flag
pub async fn healthz(State(state): State<AppState>) -> impl IntoResponse {
    let online = state.health.online();

    Json(json!({
        "status": if online { "ok" } else { "offline" },
        "upstream_online": online,
    }))
}
