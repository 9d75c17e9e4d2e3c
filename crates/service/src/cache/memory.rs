use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use newsdash_core::Clock;
use tokio::sync::RwLock;

use super::backend::{CacheBackend, CacheError};

#[derive(Debug, Clone)]
struct CacheEntry {
    value: String,
    expires_at: DateTime<Utc>,
}

impl CacheEntry {
    fn is_live(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// In-process cache backend.
///
/// Expiry is lazy: an expired entry is treated as absent and removed on the next
/// read, or in bulk by `purge_expired`.
pub struct MemoryCache {
    regions: RwLock<HashMap<String, HashMap<String, CacheEntry>>>,
    clock: Arc<dyn Clock>,
}

impl MemoryCache {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { regions: RwLock::new(HashMap::new()), clock }
    }

    /// Drop every expired entry. Returns how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut regions = self.regions.write().await;
        let mut removed = 0;
        for entries in regions.values_mut() {
            let before = entries.len();
            entries.retain(|_, entry| entry.is_live(now));
            removed += before - entries.len();
        }
        regions.retain(|_, entries| !entries.is_empty());
        removed
    }

    pub async fn len(&self) -> usize {
        self.regions.read().await.values().map(HashMap::len).sum()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl CacheBackend for MemoryCache {
    async fn get(&self, region: &str, key: &str) -> Result<Option<String>, CacheError> {
        let now = self.clock.now();
        {
            let regions = self.regions.read().await;
            match regions.get(region).and_then(|entries| entries.get(key)) {
                None => return Ok(None),
                Some(entry) if entry.is_live(now) => return Ok(Some(entry.value.clone())),
                Some(_) => {},
            }
        }
        let mut regions = self.regions.write().await;
        if let Some(entries) = regions.get_mut(region) {
            if entries.get(key).is_some_and(|entry| !entry.is_live(now)) {
                entries.remove(key);
            }
        }
        Ok(None)
    }

    async fn put(
        &self,
        region: &str,
        key: &str,
        value: String,
        ttl: Duration,
    ) -> Result<(), CacheError> {
        let ttl = chrono::Duration::from_std(ttl)
            .map_err(|e| CacheError::Unavailable(format!("ttl out of range: {e}")))?;
        let entry = CacheEntry { value, expires_at: self.clock.now() + ttl };
        self.regions
            .write()
            .await
            .entry(region.to_owned())
            .or_default()
            .insert(key.to_owned(), entry);
        Ok(())
    }

    async fn evict(&self, region: &str, key: &str) -> Result<(), CacheError> {
        if let Some(entries) = self.regions.write().await.get_mut(region) {
            entries.remove(key);
        }
        Ok(())
    }

    async fn clear(&self, region: &str) -> Result<(), CacheError> {
        self.regions.write().await.remove(region);
        Ok(())
    }
}
