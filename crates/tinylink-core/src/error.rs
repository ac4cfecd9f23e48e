use crate::shortcode::ShortCode;
use thiserror::Error;

/// Errors raised by core type validation.
#[derive(Debug, Clone, Error)]
pub enum CoreError {
    #[error("invalid short code: {0}")]
    InvalidShortCode(String),
}

/// Errors reported by a [`LinkStore`](crate::store::LinkStore) backend.
///
/// `Conflict` is the uniqueness-constraint violation and drives the
/// shortener's retry loop; every other variant aborts the operation.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("short code already exists: {0}")]
    Conflict(String),
    #[error("store backend unavailable: {0}")]
    Unavailable(String),
    #[error("store operation timed out: {0}")]
    Timeout(String),
    #[error("store query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
}

/// Errors reported by a [`LinkCache`](crate::cache::LinkCache) backend.
///
/// A clean miss is not an error; it is the `Ok(None)` return of
/// [`LinkCache::get`](crate::cache::LinkCache::get).
#[derive(Debug, Clone, Error)]
pub enum CacheError {
    #[error("cache backend unavailable: {0}")]
    Unavailable(String),
    #[error("cache operation timed out: {0}")]
    Timeout(String),
    #[error("cache operation failed: {0}")]
    Operation(String),
}

/// Errors reported by an ID generator.
#[derive(Debug, Clone, Error)]
pub enum IdError {
    #[error("id space exhausted: {0}")]
    Exhausted(String),
    #[error("id generation failed: {0}")]
    Generator(String),
}

/// The error surface of the [`Shortener`](crate::shortener::Shortener)
/// operations. Each variant keeps its kind distinguishable so the transport
/// can map it to an appropriate status.
#[derive(Debug, Error)]
pub enum ShortenerError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("invalid short code: {0}")]
    InvalidShortCode(String),
    #[error("short code not found: {0}")]
    NotFound(ShortCode),
    #[error("could not allocate a unique short code after {attempts} attempts")]
    CodeSpaceExhausted { attempts: u32 },
    #[error("id generation failed: {0}")]
    IdGeneration(#[from] IdError),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("cache error: {0}")]
    Cache(#[from] CacheError),
}

impl From<CoreError> for ShortenerError {
    fn from(value: CoreError) -> Self {
        match value {
            CoreError::InvalidShortCode(message) => Self::InvalidShortCode(message),
        }
    }
}
