//! Decision engine configuration

use bytes::Bytes;
use http::StatusCode;

/// Body synthesized for requests that cannot be served while offline.
pub const OFFLINE_ERROR_BODY: &[u8] = b"{\"message\": \"gateway timeout\"}\n";

/// Page size injected into GET requests that do not specify one.
pub const DEFAULT_PER_PAGE: usize = 100;

/// Configuration for the decision engine.
#[derive(Debug, Clone)]
pub struct MirrorConfig {
    /// Default page size for paginated GETs without a `per_page` param.
    pub per_page: usize,
    /// Status code for synthesized offline failures.
    pub offline_status: StatusCode,
    /// Body for synthesized offline failures.
    pub offline_body: Bytes,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            per_page: DEFAULT_PER_PAGE,
            offline_status: StatusCode::GATEWAY_TIMEOUT,
            offline_body: Bytes::from_static(OFFLINE_ERROR_BODY),
        }
    }
}
