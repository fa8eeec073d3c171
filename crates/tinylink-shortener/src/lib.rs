//! URL shortener service implementation.
//!
//! [`ShortenerService`] ties a [`Deriver`][tinylink_core::Deriver] to a
//! [`MappingStore`][tinylink_core::MappingStore]: shortening derives the
//! token and stores the mapping, expanding looks the token up.

pub mod error;
pub mod service;
pub mod shortener;

pub use error::ShortenerError;
pub use service::ShortenerService;
pub use shortener::Shortener;
