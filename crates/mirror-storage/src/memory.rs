//! In-memory cache backend

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::debug;

use crate::cache::ResponseCache;
use crate::error::StorageError;
use crate::models::{CacheKey, CachedResponse};

/// Default in-memory response cache.
///
/// Entries are held behind `Arc` so a get hands out a cheap snapshot
/// while a concurrent set swaps the slot underneath it.
#[derive(Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<CacheKey, Arc<CachedResponse>>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[async_trait]
impl ResponseCache for MemoryCache {
    async fn contains(&self, key: &CacheKey) -> Result<bool, StorageError> {
        Ok(self.entries.read().contains_key(key))
    }

    async fn get(&self, key: &CacheKey) -> Result<Option<CachedResponse>, StorageError> {
        Ok(self.entries.read().get(key).map(|e| (**e).clone()))
    }

    async fn set(&self, key: CacheKey, response: CachedResponse) -> Result<(), StorageError> {
        debug!("Caching response for {}", key.url());
        self.entries.write().insert(key, Arc::new(response));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use http::{HeaderMap, HeaderValue, StatusCode};

    fn make_response(body: &'static [u8]) -> CachedResponse {
        let mut headers = HeaderMap::new();
        headers.insert(http::header::ETAG, HeaderValue::from_static("\"v1\""));
        CachedResponse::new(StatusCode::OK, headers, Bytes::from_static(body))
    }

    #[tokio::test]
    async fn test_get_missing_key() {
        let cache = MemoryCache::new();
        let key = CacheKey::new("https://api.example.com/users", None);

        assert!(!cache.contains(&key).await.unwrap());
        assert!(cache.get(&key).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let cache = MemoryCache::new();
        let key = CacheKey::new("https://api.example.com/users", Some("f00".to_string()));

        cache
            .set(key.clone(), make_response(b"[1, 2, 3]"))
            .await
            .unwrap();

        assert!(cache.contains(&key).await.unwrap());
        let stored = cache.get(&key).await.unwrap().unwrap();
        assert_eq!(stored.body, Bytes::from_static(b"[1, 2, 3]"));
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_set_replaces_previous_entry() {
        let cache = MemoryCache::new();
        let key = CacheKey::new("https://api.example.com/users", None);

        cache.set(key.clone(), make_response(b"[1]")).await.unwrap();
        cache.set(key.clone(), make_response(b"[2]")).await.unwrap();

        let stored = cache.get(&key).await.unwrap().unwrap();
        assert_eq!(stored.body, Bytes::from_static(b"[2]"));
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_distinct_fingerprints_are_distinct_slots() {
        let cache = MemoryCache::new();
        let anon = CacheKey::new("https://api.example.com/users", None);
        let authed = CacheKey::new("https://api.example.com/users", Some("ab12".to_string()));

        cache.set(anon.clone(), make_response(b"[]")).await.unwrap();

        assert!(cache.contains(&anon).await.unwrap());
        assert!(!cache.contains(&authed).await.unwrap());
    }
}
