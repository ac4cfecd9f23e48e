use async_trait::async_trait;
use redis::AsyncCommands;
use std::time::Duration;
use tinylink_core::{CacheError, LinkCache, ShortCode};
use tracing::{debug, trace, warn};

/// A Redis-backed implementation of [`LinkCache`].
///
/// Stores bare URL strings under a configurable key prefix; entry lifetime
/// is enforced server-side through `SET` with an expiry.
#[derive(Debug, Clone)]
pub struct RedisLinkCache {
    conn: redis::aio::MultiplexedConnection,
    key_prefix: String,
}

fn map_redis_error(operation: &str, err: redis::RedisError) -> CacheError {
    let message = format!("{operation}: {err}");
    if message.to_ascii_lowercase().contains("timed out") {
        CacheError::Timeout(message)
    } else {
        CacheError::Operation(message)
    }
}

impl RedisLinkCache {
    /// Creates a new Redis link cache.
    ///
    /// # Arguments
    ///
    /// * `conn` - A multiplexed Redis connection
    pub fn new(conn: redis::aio::MultiplexedConnection) -> Self {
        Self {
            conn,
            key_prefix: "tl:url:".to_string(),
        }
    }

    /// Creates a new Redis link cache with a custom key prefix.
    pub fn with_prefix(
        conn: redis::aio::MultiplexedConnection,
        key_prefix: impl Into<String>,
    ) -> Self {
        Self {
            conn,
            key_prefix: key_prefix.into(),
        }
    }

    /// Generates the cache key for a short code.
    fn cache_key(&self, code: &ShortCode) -> String {
        format!("{}{}", self.key_prefix, code.as_str())
    }
}

#[async_trait]
impl LinkCache for RedisLinkCache {
    async fn get(&self, code: &ShortCode) -> Result<Option<String>, CacheError> {
        let key = self.cache_key(code);
        trace!(code = %code, "fetching url from redis cache");

        let mut conn = self.conn.clone();
        match conn.get::<_, Option<String>>(&key).await {
            Ok(Some(url)) => {
                debug!(code = %code, "cache hit in redis");
                Ok(Some(url))
            }
            Ok(None) => {
                trace!(code = %code, "cache miss in redis");
                Ok(None)
            }
            Err(e) => {
                warn!(code = %code, error = %e, "redis error on get");
                Err(map_redis_error("failed to fetch value from redis", e))
            }
        }
    }

    async fn set(&self, code: &ShortCode, url: &str, ttl: Duration) -> Result<(), CacheError> {
        let key = self.cache_key(code);
        trace!(code = %code, "storing url in redis cache");

        let mut conn = self.conn.clone();
        match conn.set_ex::<_, _, ()>(&key, url, ttl.as_secs()).await {
            Ok(()) => {
                debug!(code = %code, ttl_secs = ttl.as_secs(), "cached url in redis");
                Ok(())
            }
            Err(e) => {
                warn!(code = %code, error = %e, "failed to cache url in redis");
                Err(map_redis_error("failed to write value to redis", e))
            }
        }
    }
}
