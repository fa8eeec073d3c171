use crate::error::ShortenerError;
use crate::shortener::Shortener;
use async_trait::async_trait;
use std::sync::Arc;
use tinylink_core::{Deriver, Mapping, MappingStore, Token};
use tracing::{debug, trace};

/// A concrete implementation of the [`Shortener`] trait.
///
/// Note: collisions between distinct long URLs are not detected. When two
/// URLs derive the same token, the mapping stored last is the one served.
#[derive(Debug)]
pub struct ShortenerService<S, D> {
    store: Arc<S>,
    deriver: Arc<D>,
}

impl<S, D> Clone for ShortenerService<S, D> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            deriver: Arc::clone(&self.deriver),
        }
    }
}

impl<S: MappingStore, D: Deriver> ShortenerService<S, D> {
    pub fn new(store: S, deriver: D) -> Self {
        Self {
            store: Arc::new(store),
            deriver: Arc::new(deriver),
        }
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

#[async_trait]
impl<S: MappingStore, D: Deriver> Shortener for ShortenerService<S, D> {
    async fn shorten(&self, long_url: &str) -> Result<Mapping, ShortenerError> {
        if long_url.is_empty() {
            return Err(ShortenerError::EmptyUrl);
        }

        let token = self.deriver.derive(long_url);
        trace!(token = %token, "derived token");

        self.store.store(&token, long_url).await?;
        debug!(token = %token, url = %long_url, "stored mapping");

        Ok(Mapping::new(token, long_url))
    }

    async fn expand(&self, token: &Token) -> Result<Option<String>, ShortenerError> {
        trace!(token = %token, "expanding token");

        let long_url = self.store.lookup(token).await?;
        match &long_url {
            Some(url) => debug!(token = %token, url = %url, "resolved token"),
            None => trace!(token = %token, "token not found"),
        }
        Ok(long_url)
    }
}
