//! Mirror Cache HTTP API
//!
//! This crate provides the axum-based HTTP surface: the catch-all
//! mirror route, the health endpoint, and Prometheus metrics.

pub mod error;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::{AppState, MetricsHandle};
