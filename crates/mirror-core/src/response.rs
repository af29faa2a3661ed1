//! Request and response value types

use std::fmt;

use bytes::Bytes;
use http::header::{HeaderName, HeaderValue};
use http::{HeaderMap, Method, StatusCode};

use mirror_proxy::UpstreamResponse;
use mirror_storage::CachedResponse;

/// Diagnostic header added to every response.
pub const X_CACHE: HeaderName = HeaderName::from_static("x-cache");

/// How a response was produced, reported in the `X-Cache` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    OnlineMiss,
    OnlineHit,
    RateLimitedMiss,
    RateLimitedHit,
    OfflineMiss,
    OfflineHit,
}

impl CacheStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheStatus::OnlineMiss => "ONLINE_MISS",
            CacheStatus::OnlineHit => "ONLINE_HIT",
            CacheStatus::RateLimitedMiss => "RATE_LIMITED_MISS",
            CacheStatus::RateLimitedHit => "RATE_LIMITED_HIT",
            CacheStatus::OfflineMiss => "OFFLINE_MISS",
            CacheStatus::OfflineHit => "OFFLINE_HIT",
        }
    }

    pub fn is_hit(&self) -> bool {
        matches!(
            self,
            CacheStatus::OnlineHit | CacheStatus::RateLimitedHit | CacheStatus::OfflineHit
        )
    }
}

impl fmt::Display for CacheStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An inbound request as seen by the decision engine.
#[derive(Debug, Clone)]
pub struct MirrorRequest {
    pub method: Method,
    /// Full upstream URL, without the query string.
    pub url: String,
    /// Raw `Authorization` header value, if the caller sent one.
    pub credential: Option<String>,
    /// Request body, for non-GET methods.
    pub body: Option<Bytes>,
    /// Query parameters to forward upstream.
    pub params: Vec<(String, String)>,
}

impl MirrorRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            credential: None,
            body: None,
            params: Vec::new(),
        }
    }
}

/// The decision engine's answer to a request.
///
/// Built as a fresh value for every call; the `X-Cache` header is set
/// at construction rather than patched onto a shared response object,
/// so concurrent calls never observe each other's diagnostics.
#[derive(Debug, Clone)]
pub struct MirrorResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
    pub cache_status: CacheStatus,
}

impl MirrorResponse {
    fn build(
        status: StatusCode,
        mut headers: HeaderMap,
        body: Bytes,
        cache_status: CacheStatus,
    ) -> Self {
        headers.insert(X_CACHE, HeaderValue::from_static(cache_status.as_str()));
        Self {
            status,
            headers,
            body,
            cache_status,
        }
    }

    /// Wrap a live upstream response.
    pub fn from_upstream(response: UpstreamResponse, cache_status: CacheStatus) -> Self {
        Self::build(response.status, response.headers, response.body, cache_status)
    }

    /// Serve a cached snapshot.
    pub fn from_cached(entry: CachedResponse, cache_status: CacheStatus) -> Self {
        Self::build(entry.status, entry.headers, entry.body, cache_status)
    }

    /// Synthesize a response with no upstream involvement.
    pub fn synthesized(status: StatusCode, body: Bytes, cache_status: CacheStatus) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(
            http::header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        Self::build(status, headers, body, cache_status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_header_always_present() {
        let resp = MirrorResponse::synthesized(
            StatusCode::GATEWAY_TIMEOUT,
            Bytes::from_static(b"{}"),
            CacheStatus::OfflineMiss,
        );
        assert_eq!(
            resp.headers.get(X_CACHE).unwrap().to_str().unwrap(),
            "OFFLINE_MISS"
        );
    }

    #[test]
    fn test_stale_diagnostic_is_overwritten() {
        let mut headers = HeaderMap::new();
        headers.insert(X_CACHE, HeaderValue::from_static("ONLINE_MISS"));
        let entry = CachedResponse::new(StatusCode::OK, headers, Bytes::from_static(b"[]"));

        let resp = MirrorResponse::from_cached(entry, CacheStatus::OfflineHit);
        assert_eq!(
            resp.headers.get(X_CACHE).unwrap().to_str().unwrap(),
            "OFFLINE_HIT"
        );
    }
}
