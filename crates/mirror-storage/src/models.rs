//! Cache data model

use bytes::Bytes;
use http::{HeaderMap, StatusCode};

/// Lookup key for a cached upstream response.
///
/// A key is the pair of the request URL and an optional one-way
/// fingerprint of the caller's credential. The raw credential itself
/// never reaches the store; callers with distinct credentials get
/// distinct cache slots for the same URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    url: String,
    fingerprint: Option<String>,
}

impl CacheKey {
    pub fn new(url: impl Into<String>, fingerprint: Option<String>) -> Self {
        Self {
            url: url.into(),
            fingerprint,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn fingerprint(&self) -> Option<&str> {
        self.fingerprint.as_deref()
    }
}

/// Immutable snapshot of an upstream response.
///
/// Stored wholesale and replaced wholesale; entries are never patched in
/// place. The header map preserves the revalidation and pagination
/// headers (`ETag`, `Last-Modified`, `Link`) the decision engine relies
/// on.
#[derive(Debug, Clone)]
pub struct CachedResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl CachedResponse {
    pub fn new(status: StatusCode, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Value of the `ETag` header, if present and valid UTF-8.
    pub fn etag(&self) -> Option<&str> {
        self.headers
            .get(http::header::ETAG)
            .and_then(|v| v.to_str().ok())
    }

    /// Value of the `Last-Modified` header, if present and valid UTF-8.
    pub fn last_modified(&self) -> Option<&str> {
        self.headers
            .get(http::header::LAST_MODIFIED)
            .and_then(|v| v.to_str().ok())
    }
}
