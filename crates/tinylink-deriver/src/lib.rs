//! Token derivation for tinylink.
//!
//! Tokens are derived from the long URL itself, so shortening the same URL
//! twice always yields the same token and no coordination between processes
//! is needed.

pub mod sha256;

pub use sha256::Sha256Deriver;
pub use tinylink_core::Deriver;
