use thiserror::Error;

/// Errors raised while parsing a token from untrusted input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("invalid token: {0}")]
    Invalid(String),
}

/// Errors raised by a [`MappingStore`][crate::MappingStore] implementation.
///
/// Absence of a mapping is not an error; lookups report it as `Ok(None)`.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("store backend unavailable: {0}")]
    Unavailable(String),
    #[error("store operation timed out: {0}")]
    Timeout(String),
    #[error("store operation failed: {0}")]
    Operation(String),
}

impl StoreError {
    /// Whether a later attempt of the same operation might succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::Unavailable(_) | StoreError::Timeout(_))
    }
}
