use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use jiff::Timestamp;
use tinylink_core::error::StoreError;
use tinylink_core::shortcode::ShortCode;
use tinylink_core::store::{Link, LinkStore};

/// In-memory link store backed by a concurrent hash map.
///
/// Mirrors the durable store's contract, including the atomic
/// insert-if-absent that reports duplicates as [`StoreError::Conflict`].
/// Useful for tests and single-process deployments without persistence.
#[derive(Debug, Default)]
pub struct InMemoryLinkStore {
    links: DashMap<ShortCode, Link>,
}

impl InMemoryLinkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored links.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

#[async_trait]
impl LinkStore for InMemoryLinkStore {
    async fn insert(&self, code: &ShortCode, url: &str) -> Result<(), StoreError> {
        match self.links.entry(code.clone()) {
            Entry::Occupied(_) => Err(StoreError::Conflict(code.to_string())),
            Entry::Vacant(vacant) => {
                vacant.insert(Link {
                    url: url.to_string(),
                    created_at: Timestamp::now(),
                });
                Ok(())
            }
        }
    }

    async fn get(&self, code: &ShortCode) -> Result<Option<Link>, StoreError> {
        Ok(self.links.get(code).map(|entry| entry.value().clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(value: &str) -> ShortCode {
        ShortCode::parse(value).unwrap()
    }

    #[tokio::test]
    async fn insert_and_get_round_trip() {
        let store = InMemoryLinkStore::new();
        let c = code("00000abc");

        store.insert(&c, "https://example.com").await.unwrap();

        let link = store.get(&c).await.unwrap().unwrap();
        assert_eq!(link.url, "https://example.com");
    }

    #[tokio::test]
    async fn get_missing_code_returns_none() {
        let store = InMemoryLinkStore::new();
        assert_eq!(store.get(&code("00000abc")).await.unwrap(), None);
    }

    #[tokio::test]
    async fn duplicate_insert_conflicts() {
        let store = InMemoryLinkStore::new();
        let c = code("00000abc");

        store.insert(&c, "https://one.example").await.unwrap();
        let err = store.insert(&c, "https://two.example").await.unwrap_err();

        assert!(matches!(err, StoreError::Conflict(_)));
        assert_eq!(store.len(), 1);
        // The original association is untouched.
        let link = store.get(&c).await.unwrap().unwrap();
        assert_eq!(link.url, "https://one.example");
    }

    #[tokio::test]
    async fn created_at_is_stamped_at_insert() {
        let store = InMemoryLinkStore::new();
        let c = code("00000abc");

        let before = Timestamp::now();
        store.insert(&c, "https://example.com").await.unwrap();
        let after = Timestamp::now();

        let link = store.get(&c).await.unwrap().unwrap();
        assert!(link.created_at >= before && link.created_at <= after);
    }
}
