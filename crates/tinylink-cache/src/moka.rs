use async_trait::async_trait;
use moka::future::Cache;
use moka::Expiry;
use std::time::{Duration, Instant};
use tinylink_core::{CacheError, LinkCache, ShortCode};
use tracing::{debug, trace};

const DEFAULT_MAX_CAPACITY: u64 = 10_000;

/// Entries carry their own TTL so one cache instance can honor the
/// caller-supplied lifetime per entry.
#[derive(Debug, Clone)]
struct CachedUrl {
    url: String,
    ttl: Duration,
}

struct PerEntryTtl;

impl Expiry<String, CachedUrl> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &CachedUrl,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// An in-process implementation of [`LinkCache`] backed by Moka.
///
/// Suitable for single-node deployments and tests; separate instances do
/// not share entries, so multi-instance deployments want the Redis cache.
#[derive(Debug, Clone)]
pub struct MokaLinkCache {
    cache: Cache<String, CachedUrl>,
}

impl MokaLinkCache {
    /// Creates a cache with the default maximum capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_CAPACITY)
    }

    /// Creates a cache bounded to `max_capacity` entries.
    pub fn with_capacity(max_capacity: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .expire_after(PerEntryTtl)
            .build();
        Self { cache }
    }
}

impl Default for MokaLinkCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LinkCache for MokaLinkCache {
    async fn get(&self, code: &ShortCode) -> Result<Option<String>, CacheError> {
        trace!(code = %code, "fetching url from moka cache");

        match self.cache.get(code.as_str()).await {
            Some(entry) => {
                debug!(code = %code, "cache hit in moka");
                Ok(Some(entry.url))
            }
            None => {
                trace!(code = %code, "cache miss in moka");
                Ok(None)
            }
        }
    }

    async fn set(&self, code: &ShortCode, url: &str, ttl: Duration) -> Result<(), CacheError> {
        trace!(code = %code, "storing url in moka cache");

        self.cache
            .insert(
                code.as_str().to_string(),
                CachedUrl {
                    url: url.to_string(),
                    ttl,
                },
            )
            .await;
        debug!(code = %code, ttl_secs = ttl.as_secs(), "cached url in moka");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(value: &str) -> ShortCode {
        ShortCode::parse(value).unwrap()
    }

    #[tokio::test]
    async fn set_then_get_round_trip() {
        let cache = MokaLinkCache::new();
        let c = code("00000abc");

        cache
            .set(&c, "https://example.com", Duration::from_secs(60))
            .await
            .unwrap();

        assert_eq!(
            cache.get(&c).await.unwrap().as_deref(),
            Some("https://example.com")
        );
    }

    #[tokio::test]
    async fn missing_code_is_a_clean_miss() {
        let cache = MokaLinkCache::new();
        assert_eq!(cache.get(&code("00000abc")).await.unwrap(), None);
    }

    #[tokio::test]
    async fn entries_expire_after_their_ttl() {
        let cache = MokaLinkCache::new();
        let c = code("00000abc");

        cache
            .set(&c, "https://example.com", Duration::from_millis(50))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(150)).await;

        assert_eq!(cache.get(&c).await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_refreshes_an_existing_entry() {
        let cache = MokaLinkCache::new();
        let c = code("00000abc");

        cache
            .set(&c, "https://old.example", Duration::from_secs(60))
            .await
            .unwrap();
        cache
            .set(&c, "https://new.example", Duration::from_secs(60))
            .await
            .unwrap();

        assert_eq!(
            cache.get(&c).await.unwrap().as_deref(),
            Some("https://new.example")
        );
    }
}
