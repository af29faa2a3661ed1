//! Mirror Cache decision engine
//!
//! This crate decides, for every inbound request, whether to forward it
//! live, revalidate a cached copy with conditional headers, serve stale
//! content because the upstream is rate-limiting, or synthesize a
//! failure because the upstream is unreachable.

pub mod cache_key;
pub mod config;
pub mod error;
pub mod health;
pub mod metrics;
pub mod mirror;
pub mod rate_limit;
pub mod response;

pub use cache_key::cache_key;
pub use config::MirrorConfig;
pub use error::CoreError;
pub use health::UpstreamHealth;
pub use metrics::InstrumentedMirror;
pub use mirror::MirrorService;
pub use rate_limit::is_rate_limited;
pub use response::{CacheStatus, MirrorRequest, MirrorResponse, X_CACHE};
