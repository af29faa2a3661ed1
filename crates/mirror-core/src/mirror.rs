//! Conditional-request mirror service
//!
//! The service routes every request by the upstream health flag. Online
//! GETs run the conditional-request protocol: revalidate cached entries
//! with `If-None-Match`/`If-Modified-Since`, fall back to cache when the
//! upstream rate-limits, and refresh entries that can no longer be
//! trusted. Offline requests are answered from cache or synthesized,
//! never forwarded.

use std::sync::Arc;

use http::header::{AUTHORIZATION, HeaderValue, IF_MODIFIED_SINCE, IF_NONE_MATCH};
use http::{HeaderMap, Method, StatusCode};
use tracing::{debug, info};

use mirror_proxy::{Transport, UpstreamRequest, UpstreamResponse};
use mirror_storage::{CacheKey, CachedResponse, ResponseCache};

use crate::cache_key::cache_key;
use crate::config::MirrorConfig;
use crate::error::CoreError;
use crate::health::UpstreamHealth;
use crate::rate_limit::is_rate_limited;
use crate::response::{CacheStatus, MirrorRequest, MirrorResponse};

/// Query parameter controlling upstream page size.
const PER_PAGE_PARAM: &str = "per_page";

/// Decision engine for the caching mirror.
///
/// All collaborators are injected: the transport, the response cache
/// and the health flag are shared across concurrent calls and own
/// their synchronization. Within one call the cache is read at most
/// once before the network round trip and written at most once after.
pub struct MirrorService {
    transport: Arc<dyn Transport>,
    cache: Arc<dyn ResponseCache>,
    health: Arc<UpstreamHealth>,
    config: MirrorConfig,
}

impl MirrorService {
    pub fn new(
        transport: Arc<dyn Transport>,
        cache: Arc<dyn ResponseCache>,
        health: Arc<UpstreamHealth>,
        config: MirrorConfig,
    ) -> Self {
        Self {
            transport,
            cache,
            health,
            config,
        }
    }

    /// Handle one inbound request.
    ///
    /// Reads the health flag exactly once; a flip mid-call does not
    /// reroute the request.
    pub async fn handle(&self, request: MirrorRequest) -> Result<MirrorResponse, CoreError> {
        if self.health.online() {
            self.handle_online(request).await
        } else {
            self.handle_offline(request).await
        }
    }

    /// Conditional-request protocol against a healthy upstream.
    async fn handle_online(&self, request: MirrorRequest) -> Result<MirrorResponse, CoreError> {
        let mut params = request.params.clone();
        let per_page = match requested_per_page(&params)? {
            Some(n) => n,
            None => {
                params.push((PER_PAGE_PARAM.to_string(), self.config.per_page.to_string()));
                self.config.per_page
            }
        };

        let mut headers = HeaderMap::new();
        if let Some(cred) = &request.credential {
            headers.insert(AUTHORIZATION, header_value(cred)?);
        }

        // Mutating methods have no cache semantics; forward verbatim.
        if request.method != Method::GET {
            let upstream = UpstreamRequest {
                method: request.method.clone(),
                url: request.url.clone(),
                headers,
                params,
                body: request.body,
            };
            let response = self.transport.send(upstream).await?;

            info!("ONLINE {} CACHE_MISS {}", request.method, request.url);
            return Ok(MirrorResponse::from_upstream(response, CacheStatus::OnlineMiss));
        }

        let key = cache_key(&request.url, request.credential.as_deref());
        let cached = self.cache.get(&key).await?;

        if let Some(entry) = &cached {
            if let Some(etag) = entry.etag() {
                headers.insert(IF_NONE_MATCH, header_value(etag)?);
            }
            if let Some(last_modified) = entry.last_modified() {
                headers.insert(IF_MODIFIED_SINCE, header_value(last_modified)?);
            }
        }

        let upstream = UpstreamRequest {
            method: Method::GET,
            url: request.url.clone(),
            headers: headers.clone(),
            params: params.clone(),
            body: None,
        };
        let response = self.transport.send(upstream).await?;

        if response.status == StatusCode::NOT_MODIFIED {
            let entry = cached.ok_or_else(|| {
                CoreError::ProtocolViolation("304 for a request without conditional headers".into())
            })?;

            // A full page with no next link is ambiguous: it may be the
            // last page, or a page that has since grown a successor
            // upstream. The validators cannot tell the two apart, so
            // refetch unconditionally.
            if body_element_count(&entry.body) == per_page && !has_next_page(&entry.headers) {
                debug!("Full page without next link, refetching {}", request.url);

                let mut retry_headers = headers;
                retry_headers.remove(IF_NONE_MATCH);
                retry_headers.remove(IF_MODIFIED_SINCE);

                let retry = UpstreamRequest {
                    method: Method::GET,
                    url: request.url.clone(),
                    headers: retry_headers,
                    params,
                    body: None,
                };
                let response = self.transport.send(retry).await?;

                self.store_if_cacheable(key, &response).await?;
                info!("ONLINE GET CACHE_MISS {}", request.url);
                return Ok(MirrorResponse::from_upstream(response, CacheStatus::OnlineMiss));
            }

            info!("ONLINE GET CACHE_HIT {}", request.url);
            return Ok(MirrorResponse::from_cached(entry, CacheStatus::OnlineHit));
        }

        // Upstream is throttling us; prefer stale content over a 403.
        if is_rate_limited(&response) {
            return Ok(match cached {
                Some(entry) => {
                    info!("RATE_LIMITED GET CACHE_HIT {}", request.url);
                    MirrorResponse::from_cached(entry, CacheStatus::RateLimitedHit)
                }
                None => {
                    info!("RATE_LIMITED GET CACHE_MISS {}", request.url);
                    MirrorResponse::from_upstream(response, CacheStatus::RateLimitedMiss)
                }
            });
        }

        self.store_if_cacheable(key, &response).await?;
        info!("ONLINE GET CACHE_MISS {}", request.url);
        Ok(MirrorResponse::from_upstream(response, CacheStatus::OnlineMiss))
    }

    /// Serve from cache or synthesize while the upstream is down.
    ///
    /// Never touches the transport.
    async fn handle_offline(&self, request: MirrorRequest) -> Result<MirrorResponse, CoreError> {
        if request.method != Method::GET {
            info!("OFFLINE {} CACHE_MISS {}", request.method, request.url);
            return Ok(self.offline_error());
        }

        let key = cache_key(&request.url, request.credential.as_deref());
        if let Some(entry) = self.cache.get(&key).await? {
            info!("OFFLINE GET CACHE_HIT {}", request.url);
            return Ok(MirrorResponse::from_cached(entry, CacheStatus::OfflineHit));
        }

        info!("OFFLINE GET CACHE_MISS {}", request.url);
        Ok(self.offline_error())
    }

    fn offline_error(&self) -> MirrorResponse {
        MirrorResponse::synthesized(
            self.config.offline_status,
            self.config.offline_body.clone(),
            CacheStatus::OfflineMiss,
        )
    }

    /// Store a snapshot if the response is worth revalidating later:
    /// a 200 carrying at least one of ETag or Last-Modified.
    async fn store_if_cacheable(
        &self,
        key: CacheKey,
        response: &UpstreamResponse,
    ) -> Result<(), CoreError> {
        let has_validator = response.headers.contains_key(http::header::ETAG)
            || response.headers.contains_key(http::header::LAST_MODIFIED);

        if response.status == StatusCode::OK && has_validator {
            let entry = CachedResponse::new(
                response.status,
                response.headers.clone(),
                response.body.clone(),
            );
            self.cache.set(key, entry).await?;
        }

        Ok(())
    }
}

/// Page size requested by the caller, if any.
fn requested_per_page(params: &[(String, String)]) -> Result<Option<usize>, CoreError> {
    match params.iter().find(|(name, _)| name == PER_PAGE_PARAM) {
        Some((_, value)) => value
            .parse::<usize>()
            .map(Some)
            .map_err(|_| CoreError::InvalidRequest(format!("Invalid per_page value: {value}"))),
        None => Ok(None),
    }
}

/// Number of top-level JSON elements in a cached body.
///
/// Non-JSON and scalar bodies count as zero; they can never look like
/// a full page.
fn body_element_count(body: &[u8]) -> usize {
    match serde_json::from_slice::<serde_json::Value>(body) {
        Ok(serde_json::Value::Array(items)) => items.len(),
        Ok(serde_json::Value::Object(map)) => map.len(),
        _ => 0,
    }
}

/// Whether a stored response advertises a next page in its `Link`
/// header.
fn has_next_page(headers: &HeaderMap) -> bool {
    headers.get_all(http::header::LINK).iter().any(|value| {
        value
            .to_str()
            .map(|links| links.split(',').any(|link| link.contains("rel=\"next\"")))
            .unwrap_or(false)
    })
}

fn header_value(value: &str) -> Result<HeaderValue, CoreError> {
    HeaderValue::from_str(value)
        .map_err(|_| CoreError::InvalidRequest(format!("Invalid header value: {value}")))
}
