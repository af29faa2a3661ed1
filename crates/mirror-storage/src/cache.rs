//! Response cache trait

use async_trait::async_trait;

use crate::error::StorageError;
use crate::models::{CacheKey, CachedResponse};

/// Key/value store for upstream response snapshots.
///
/// Implementations own their synchronization; the decision engine may
/// call any method from many tasks concurrently and never assumes
/// exclusive access. Concurrent writers to the same key resolve as
/// last-write-wins.
#[async_trait]
pub trait ResponseCache: Send + Sync {
    /// Check whether an entry exists for the key.
    async fn contains(&self, key: &CacheKey) -> Result<bool, StorageError>;

    /// Fetch the snapshot stored under the key.
    async fn get(&self, key: &CacheKey) -> Result<Option<CachedResponse>, StorageError>;

    /// Store a snapshot, fully replacing any prior entry for the key.
    async fn set(&self, key: CacheKey, response: CachedResponse) -> Result<(), StorageError>;
}
