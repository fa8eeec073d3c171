use async_trait::async_trait;
use dashmap::DashMap;
use tinylink_core::store::Result;
use tinylink_core::{MappingStore, Token};
use tracing::trace;

/// In-memory implementation of [`MappingStore`] using DashMap.
///
/// Nothing is persisted across restarts.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMappingStore {
    storage: DashMap<Token, String>,
}

impl InMemoryMappingStore {
    /// Creates a new in-memory store.
    pub fn new() -> Self {
        Self {
            storage: DashMap::new(),
        }
    }

    /// Number of stored mappings.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

#[async_trait]
impl MappingStore for InMemoryMappingStore {
    async fn store(&self, token: &Token, long_url: &str) -> Result<()> {
        trace!(token = %token, "storing mapping in memory");
        self.storage.insert(token.clone(), long_url.to_owned());
        Ok(())
    }

    async fn lookup(&self, token: &Token) -> Result<Option<String>> {
        trace!(token = %token, "looking up mapping in memory");
        Ok(self.storage.get(token).map(|entry| entry.value().clone()))
    }
}
