use thiserror::Error;
use tinylink_core::StoreError;

#[derive(Debug, Clone, Error)]
pub enum ShortenerError {
    #[error("url must not be empty")]
    EmptyUrl,
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
