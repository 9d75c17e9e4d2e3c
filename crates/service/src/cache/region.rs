use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::backend::CacheBackend;

/// A named slice of a cache backend holding values of one type with one TTL.
///
/// Every backend failure is logged with the operation, region and key and then
/// swallowed: GET falls through to computation, PUT/EVICT/CLEAR are skipped.
pub struct CacheRegion<V> {
    backend: Arc<dyn CacheBackend>,
    name: &'static str,
    ttl: Duration,
    _value: PhantomData<fn() -> V>,
}

impl<V> Clone for CacheRegion<V> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            name: self.name,
            ttl: self.ttl,
            _value: PhantomData,
        }
    }
}

impl<V> CacheRegion<V>
where
    V: Serialize + DeserializeOwned + Send,
{
    pub fn new(backend: Arc<dyn CacheBackend>, name: &'static str, ttl: Duration) -> Self {
        Self { backend, name, ttl, _value: PhantomData }
    }

    /// Cached value for `key`, or `None` on miss, expiry, backend failure or an
    /// undecodable payload.
    pub async fn get(&self, key: &str) -> Option<V> {
        let raw = match self.backend.get(self.name, key).await {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!(
                    cache = self.name,
                    key,
                    error = %e,
                    "cache unreachable during GET, falling back to direct computation"
                );
                return None;
            },
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(cache = self.name, key, error = %e, "discarding undecodable cache entry");
                None
            },
        }
    }

    pub async fn put(&self, key: &str, value: &V) {
        let payload = match serde_json::to_string(value) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(cache = self.name, key, error = %e, "cannot serialize value for cache PUT");
                return;
            },
        };
        if let Err(e) = self.backend.put(self.name, key, payload, self.ttl).await {
            tracing::warn!(cache = self.name, key, error = %e, "cache unreachable during PUT");
        }
    }

    pub async fn evict(&self, key: &str) {
        if let Err(e) = self.backend.evict(self.name, key).await {
            tracing::warn!(cache = self.name, key, error = %e, "cache unreachable during EVICT");
        }
    }

    pub async fn clear(&self) {
        if let Err(e) = self.backend.clear(self.name).await {
            tracing::warn!(cache = self.name, error = %e, "cache unreachable during CLEAR");
        }
    }

    /// Cache-aside read: return the cached value, or compute, store and return.
    ///
    /// Concurrent misses may each compute; the last write wins.
    pub async fn get_or_compute<F, Fut>(&self, key: &str, compute: F) -> V
    where
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = V> + Send,
    {
        if let Some(hit) = self.get(key).await {
            tracing::trace!(cache = self.name, key, "cache hit");
            return hit;
        }
        let value = compute().await;
        self.put(key, &value).await;
        value
    }

    /// Like `get_or_compute` for fallible computations; errors are returned and not cached.
    pub async fn try_get_or_compute<F, Fut, E>(&self, key: &str, compute: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Result<V, E>> + Send,
    {
        if let Some(hit) = self.get(key).await {
            return Ok(hit);
        }
        let value = compute().await?;
        self.put(key, &value).await;
        Ok(value)
    }
}
