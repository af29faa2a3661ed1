//! Cache key builder

use sha1::{Digest, Sha1};

use mirror_storage::CacheKey;

/// Derive the cache key for a request.
///
/// The key pairs the request URL with a hex-encoded SHA-1 fingerprint
/// of the raw credential string, so callers with different credentials
/// never share cache slots. The fingerprint is one-way and is never
/// sent upstream; requests without a credential share the anonymous
/// slot for the URL.
pub fn cache_key(url: &str, credential: Option<&str>) -> CacheKey {
    let fingerprint = credential.map(|cred| {
        let mut hasher = Sha1::new();
        hasher.update(cred.as_bytes());
        hex::encode(hasher.finalize())
    });

    CacheKey::new(url, fingerprint)
}
