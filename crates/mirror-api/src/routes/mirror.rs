//! Catch-all mirror route

use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::header::{self, AUTHORIZATION, HeaderName};
use axum::response::{IntoResponse, Response};
use tracing::debug;

use mirror_core::{MirrorRequest, MirrorResponse};

use crate::error::ApiError;
use crate::state::AppState;

/// Request bodies larger than this are rejected outright.
const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Headers that describe the connection rather than the payload.
///
/// The transport has already decoded the upstream body, so the
/// original length and encoding no longer apply; axum recomputes them.
const HOP_BY_HOP: [HeaderName; 4] = [
    header::CONNECTION,
    header::TRANSFER_ENCODING,
    header::CONTENT_LENGTH,
    header::CONTENT_ENCODING,
];

/// Any method, any path - proxy to the upstream API.
pub async fn mirror_request(
    State(state): State<AppState>,
    request: Request,
) -> Result<Response, ApiError> {
    let (parts, body) = request.into_parts();

    debug!("{} {}", parts.method, parts.uri);

    let credential = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(String::from);

    let body = axum::body::to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read request body: {e}")))?;

    let mut mirror_request = MirrorRequest::new(
        parts.method,
        format!("{}{}", state.upstream_url, parts.uri.path()),
    );
    mirror_request.credential = credential;
    mirror_request.params = parse_query(parts.uri.query());
    if !body.is_empty() {
        mirror_request.body = Some(body);
    }

    let response = state.mirror.handle(mirror_request).await?;

    Ok(into_axum_response(response))
}

/// Decode the query string into parameter pairs.
fn parse_query(query: Option<&str>) -> Vec<(String, String)> {
    match query {
        Some(query) => url::form_urlencoded::parse(query.as_bytes())
            .map(|(name, value)| (name.into_owned(), value.into_owned()))
            .collect(),
        None => Vec::new(),
    }
}

/// Convert the engine's response to an axum response, dropping
/// connection-level headers.
fn into_axum_response(mirror_response: MirrorResponse) -> Response {
    let mut response = (mirror_response.status, Body::from(mirror_response.body)).into_response();

    let headers = response.headers_mut();
    for (name, value) in mirror_response.headers.iter() {
        if HOP_BY_HOP.contains(name) {
            continue;
        }
        headers.append(name.clone(), value.clone());
    }

    response
}
