//! Prometheus metrics endpoint

use axum::extract::State;
use axum::response::IntoResponse;

use crate::state::AppState;

/// GET /metrics - Prometheus metrics endpoint
pub async fn get_metrics(State(state): State<AppState>) -> impl IntoResponse {
    state.metrics.render()
}
