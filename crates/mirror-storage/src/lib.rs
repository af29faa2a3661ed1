//! Mirror Cache response storage
//!
//! This crate provides the cache data model (keys and response snapshots),
//! the `ResponseCache` trait, and the default in-memory backend.

pub mod cache;
pub mod error;
pub mod memory;
pub mod models;

pub use cache::ResponseCache;
pub use error::StorageError;
pub use memory::MemoryCache;
pub use models::{CacheKey, CachedResponse};
