use crate::error::CacheError;
use crate::shortcode::ShortCode;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Ephemeral keyed storage for resolved URLs.
///
/// The cache is an accelerator, never an authority: entries are populated
/// only from a just-accepted insert or a just-read store value, and they
/// disappear on their own through expiry. An absent entry is the `Ok(None)`
/// return of [`get`](LinkCache::get), distinct from backend failures.
#[async_trait]
pub trait LinkCache: Send + Sync + 'static {
    /// Looks up the cached URL for a code.
    ///
    /// Returns `Ok(None)` if the key is not in the cache.
    async fn get(&self, code: &ShortCode) -> Result<Option<String>, CacheError>;

    /// Stores a code-to-url entry that expires after `ttl`.
    async fn set(&self, code: &ShortCode, url: &str, ttl: Duration) -> Result<(), CacheError>;
}

// Forwarding impl so shared handles can be injected directly.
#[async_trait]
impl<T: LinkCache + ?Sized> LinkCache for Arc<T> {
    async fn get(&self, code: &ShortCode) -> Result<Option<String>, CacheError> {
        (**self).get(code).await
    }

    async fn set(&self, code: &ShortCode, url: &str, ttl: Duration) -> Result<(), CacheError> {
        (**self).set(code, url, ttl).await
    }
}
