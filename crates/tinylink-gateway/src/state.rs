use std::sync::Arc;

use tinylink_core::{ShortCode, Shortener};

/// Shared handler state: the shortener core plus the public base URL used
/// to render full short links.
#[derive(Clone)]
pub struct AppState {
    shortener: Arc<dyn Shortener>,
    base_url: String,
}

impl AppState {
    pub fn new(shortener: Arc<dyn Shortener>, public_base_url: impl Into<String>) -> Self {
        Self {
            shortener,
            base_url: public_base_url.into(),
        }
    }

    pub fn shortener(&self) -> &dyn Shortener {
        self.shortener.as_ref()
    }

    /// Renders the public short URL for a code.
    pub fn short_url(&self, code: &ShortCode) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), code)
    }
}
