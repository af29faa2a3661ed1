//! HTTP routes

pub mod health;
pub mod metrics;
pub mod mirror;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;

/// Build the application router.
///
/// Everything that is not a local endpoint falls through to the mirror
/// handler and is proxied upstream.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health::healthz))
        .route("/metrics", get(metrics::get_metrics))
        .fallback(mirror::mirror_request)
        .with_state(state)
}
