use crate::error::StoreError;
use crate::shortcode::ShortCode;
use async_trait::async_trait;
use jiff::Timestamp;
use std::sync::Arc;

/// A stored link record.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    /// The original URL the code resolves to.
    pub url: String,
    /// When the record was inserted, stamped by the store.
    pub created_at: Timestamp,
}

/// Durable keyed storage for links.
///
/// The store owns the uniqueness guarantee: `insert` must atomically reject
/// an already existing code with [`StoreError::Conflict`], because multiple
/// service instances insert concurrently and only shared storage can
/// arbitrate between them. Codes are never updated or reassigned once
/// inserted.
#[async_trait]
pub trait LinkStore: Send + Sync + 'static {
    /// Inserts a new link, stamping it with the store's insertion time.
    async fn insert(&self, code: &ShortCode, url: &str) -> Result<(), StoreError>;

    /// Retrieves the link for a code.
    /// Returns `None` if the code does not exist.
    async fn get(&self, code: &ShortCode) -> Result<Option<Link>, StoreError>;
}

// Forwarding impl so shared handles can be injected directly.
#[async_trait]
impl<T: LinkStore + ?Sized> LinkStore for Arc<T> {
    async fn insert(&self, code: &ShortCode, url: &str) -> Result<(), StoreError> {
        (**self).insert(code, url).await
    }

    async fn get(&self, code: &ShortCode) -> Result<Option<Link>, StoreError> {
        (**self).get(code).await
    }
}
