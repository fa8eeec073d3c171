//! Core types and traits for the tinylink URL shortener.
//!
//! This crate provides the types shared by the deriver, the storage
//! adapters, the shortener service and the HTTP gateway.

pub mod deriver;
pub mod error;
pub mod mapping;
pub mod store;
pub mod token;

pub use deriver::Deriver;
pub use error::{StoreError, TokenError};
pub use mapping::Mapping;
pub use store::MappingStore;
pub use token::{Token, TOKEN_LENGTH};
