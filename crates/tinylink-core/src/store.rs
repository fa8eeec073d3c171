use crate::error::StoreError;
use crate::token::Token;
use async_trait::async_trait;

/// Type alias for store results.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Adapter over the key-value store holding token to long URL mappings.
///
/// Every call round-trips to the backing store; implementations keep no
/// cache and do not retry.
#[async_trait]
pub trait MappingStore: Send + Sync + 'static {
    /// Writes the mapping unconditionally. The last write for a token wins.
    async fn store(&self, token: &Token, long_url: &str) -> Result<()>;

    /// Reads the long URL stored for `token`.
    /// Returns `None` if no mapping exists.
    async fn lookup(&self, token: &Token) -> Result<Option<String>>;
}
