use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tinylink_core::{
    is_valid_url, LinkCache, LinkStore, ShortCode, Shortener, ShortenerError, StoreError,
};
use tinylink_generator::IdGenerator;
use tracing::{debug, warn};

/// Bounded number of generate-encode-insert cycles per `shorten` call.
///
/// Collisions are expected to be rare — the ID space is large and
/// duplicates mostly mean a misconfigured machine id. A small bound absorbs
/// transient collisions while failing loudly under systemic ones instead of
/// retrying forever.
pub const MAX_ATTEMPTS: u32 = 5;

/// Lifetime of cache entries written by both `shorten` and `resolve`.
pub const CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// A concrete implementation of the `Shortener` trait.
///
/// Owns the collision-retry policy and the cache-aside protocol, and
/// delegates uniqueness entirely to the link store's constraint: no
/// in-process lock can arbitrate between service instances, the store can.
///
/// Dependencies are injected so the retry loop and the cache-aside path are
/// testable against substitutable store and cache fakes.
#[derive(Debug, Clone)]
pub struct ShortenerService<S, C, G> {
    store: Arc<S>,
    cache: Arc<C>,
    generator: Arc<G>,
}

impl<S: LinkStore, C: LinkCache, G: IdGenerator> ShortenerService<S, C, G> {
    /// Creates a new `ShortenerService` over the given collaborators.
    pub fn new(store: S, cache: C, generator: G) -> Self {
        Self {
            store: Arc::new(store),
            cache: Arc::new(cache),
            generator: Arc::new(generator),
        }
    }

    /// Best-effort cache population. Durability lives in the store and the
    /// cache is purely an accelerator, so a failed write is logged and
    /// swallowed, never surfaced.
    async fn populate_cache(&self, code: &ShortCode, url: &str) {
        if let Err(err) = self.cache.set(code, url, CACHE_TTL).await {
            warn!(code = %code, error = %err, "failed to populate link cache");
        }
    }
}

#[async_trait]
impl<S: LinkStore, C: LinkCache, G: IdGenerator> Shortener for ShortenerService<S, C, G> {
    async fn shorten(&self, url: &str) -> Result<ShortCode, ShortenerError> {
        if !is_valid_url(url) {
            return Err(ShortenerError::InvalidUrl(url.to_string()));
        }

        for attempt in 1..=MAX_ATTEMPTS {
            let id = self.generator.next_id()?;
            let code = ShortCode::from_id(id);

            match self.store.insert(&code, url).await {
                Ok(()) => {
                    self.populate_cache(&code, url).await;
                    debug!(code = %code, attempt, "shortened url");
                    return Ok(code);
                }
                Err(StoreError::Conflict(_)) => {
                    // A duplicate only costs a fresh id; the constraint has
                    // already protected the existing record.
                    debug!(code = %code, attempt, "short code collision, retrying");
                }
                Err(err) => return Err(ShortenerError::Store(err)),
            }
        }

        Err(ShortenerError::CodeSpaceExhausted {
            attempts: MAX_ATTEMPTS,
        })
    }

    async fn resolve(&self, code: &ShortCode) -> Result<String, ShortenerError> {
        match self.cache.get(code).await {
            Ok(Some(url)) => {
                debug!(code = %code, "resolved from cache");
                return Ok(url);
            }
            Ok(None) => {}
            Err(err) => return Err(ShortenerError::Cache(err)),
        }

        match self.store.get(code).await.map_err(ShortenerError::Store)? {
            Some(link) => {
                self.populate_cache(code, &link.url).await;
                debug!(code = %code, "resolved from store");
                Ok(link.url)
            }
            None => Err(ShortenerError::NotFound(code.clone())),
        }
    }
}
