//! Cache Module
//!
//! Key/value storage with per-entry expiration, consulted before the store.

mod entry;
mod memory;
mod redis_backend;

use async_trait::async_trait;

use crate::error::Result;

// Re-export public types
pub use entry::CacheEntry;
pub use memory::MemoryCache;
pub use redis_backend::RedisCache;

// == Cache Trait ==
/// Lossy accelerator in front of the store.
///
/// Losing any entry must only cost latency, never correctness.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Returns the live value for `key`, or `None` when absent or expired.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value, expiring
    /// `ttl_secs` seconds from now.
    async fn set_ex(&self, key: &str, value: String, ttl_secs: u64) -> Result<()>;
}
