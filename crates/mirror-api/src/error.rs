//! API error types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use mirror_core::CoreError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Core error: {0}")]
    Core(#[from] CoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Core(e) => match e {
                CoreError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
                CoreError::Transport(e) => (StatusCode::BAD_GATEWAY, e.to_string()),
                CoreError::ProtocolViolation(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
                CoreError::Storage(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            },
        };

        let body = axum::Json(json!({ "message": message }));
        (status, body).into_response()
    }
}
