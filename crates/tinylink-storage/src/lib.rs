//! Mapping store adapters for tinylink.
//!
//! [`RedisMappingStore`] keeps mappings in a single Redis hash and is what the
//! gateway runs against. [`InMemoryMappingStore`] backs local runs and tests.
//! [`RetryingStore`] optionally wraps either one with bounded retries.

pub mod memory;
pub mod redis;
pub mod retry;

pub use self::redis::{RedisMappingStore, RedisStoreConfig, DEFAULT_NAMESPACE};
pub use memory::InMemoryMappingStore;
pub use retry::{RetryPolicy, RetryingStore};
pub use tinylink_core::store::Result;
pub use tinylink_core::{MappingStore, StoreError};
