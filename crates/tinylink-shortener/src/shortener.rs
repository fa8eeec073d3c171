use crate::error::ShortenerError;
use async_trait::async_trait;
use tinylink_core::{Mapping, Token};

type Result<T> = std::result::Result<T, ShortenerError>;

#[async_trait]
pub trait Shortener: Send + Sync + 'static {
    /// Derives the token for `long_url`, stores the mapping and returns it.
    async fn shorten(&self, long_url: &str) -> Result<Mapping>;

    /// Resolves a token to its long URL.
    /// Returns `None` if no mapping exists for the token.
    async fn expand(&self, token: &Token) -> Result<Option<String>>;
}
