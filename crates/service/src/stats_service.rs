use std::sync::Arc;
use std::time::Duration;

use newsdash_core::{AnalyticsStats, STATS_CACHE_KEY, STATS_CACHE_REGION};

use crate::analytics_service::AnalyticsEngine;
use crate::cache::{CacheBackend, CacheRegion};

/// Analytics snapshot served through the cache-aside layer.
///
/// A live entry under `analytics:current` is returned as is; otherwise the engine
/// recomputes and the fresh snapshot replaces the entry whole.
pub struct CachedStatsService {
    engine: Arc<AnalyticsEngine>,
    cache: CacheRegion<AnalyticsStats>,
}

impl CachedStatsService {
    #[must_use]
    pub fn new(engine: Arc<AnalyticsEngine>, backend: Arc<dyn CacheBackend>, ttl: Duration) -> Self {
        Self { engine, cache: CacheRegion::new(backend, STATS_CACHE_REGION, ttl) }
    }

    pub async fn get_stats(&self) -> AnalyticsStats {
        self.cache.get_or_compute(STATS_CACHE_KEY, || self.engine.compute_stats()).await
    }

    /// Drop the cached snapshot so the next read recomputes.
    pub async fn invalidate(&self) {
        self.cache.evict(STATS_CACHE_KEY).await;
    }
}
