use crate::error::ShortenerError;
use crate::shortcode::ShortCode;
use async_trait::async_trait;

/// The two public operations of the shortener core.
#[async_trait]
pub trait Shortener: Send + Sync + 'static {
    /// Validates `url` and persists it under a freshly allocated short
    /// code, returning the code.
    async fn shorten(&self, url: &str) -> Result<ShortCode, ShortenerError>;

    /// Resolves a short code back to its stored URL.
    async fn resolve(&self, code: &ShortCode) -> Result<String, ShortenerError>;
}
