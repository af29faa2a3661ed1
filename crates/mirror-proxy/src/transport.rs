//! Transport trait and wire types

use async_trait::async_trait;
use bytes::Bytes;
use http::{HeaderMap, Method, StatusCode};

use crate::error::TransportError;

/// An outbound request to the upstream API.
#[derive(Debug, Clone)]
pub struct UpstreamRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    /// Query parameters, appended to the URL by the transport.
    pub params: Vec<(String, String)>,
    pub body: Option<Bytes>,
}

impl UpstreamRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HeaderMap::new(),
            params: Vec::new(),
            body: None,
        }
    }
}

/// A fully buffered response from the upstream API.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl UpstreamResponse {
    /// Response body decoded as text, for signature matching.
    pub fn body_text(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

/// Outbound request channel to the upstream.
///
/// The implementation owns the connection handling and request timeout;
/// callers get the response fully buffered or a `TransportError`.
/// No retry happens at this layer.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: UpstreamRequest) -> Result<UpstreamResponse, TransportError>;
}
