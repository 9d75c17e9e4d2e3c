use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Errors from a cache backend. Always recovered by `CacheRegion`.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache backend unavailable: {0}")]
    Unavailable(String),

    #[error("cache value serialization: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Key/value store with per-entry TTL, addressed by region and key.
///
/// Values are opaque serialized payloads. Every operation may fail independently;
/// implementations provide their own atomicity for a single key.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    async fn get(&self, region: &str, key: &str) -> Result<Option<String>, CacheError>;

    async fn put(&self, region: &str, key: &str, value: String, ttl: Duration)
    -> Result<(), CacheError>;

    async fn evict(&self, region: &str, key: &str) -> Result<(), CacheError>;

    async fn clear(&self, region: &str) -> Result<(), CacheError>;
}
