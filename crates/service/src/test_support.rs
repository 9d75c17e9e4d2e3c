//! Shared fixtures: fixed instants, event builders, and stores/caches with
//! switchable failures and call counters.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone as _, Utc};
use newsdash_core::{Event, EventFilter, ManualClock, SortSpec};
use newsdash_storage::{EventStore, MemoryStore, StoreError};

use crate::cache::{CacheBackend, CacheError, MemoryCache};

pub fn noon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

pub fn at(id: &str, ts: DateTime<Utc>) -> Event {
    Event::new(id, format!("Event {id}"), "body", None, Some(ts.to_rfc3339()))
}

/// One event per entry, timestamped that many minutes before `noon()`.
pub fn events_minutes_ago(minutes: &[i64]) -> Vec<Event> {
    minutes
        .iter()
        .enumerate()
        .map(|(i, m)| at(&format!("e{i}"), noon() - chrono::Duration::minutes(*m)))
        .collect()
}

pub fn with_category(mut event: Event, category: &str) -> Event {
    event.category = Some(category.to_owned());
    event
}

/// `MemoryStore` that counts calls and can be told to fail.
#[derive(Default)]
pub struct CountingStore {
    inner: MemoryStore,
    count_calls: AtomicUsize,
    page_calls: AtomicUsize,
    filter_calls: AtomicUsize,
    fail_count: AtomicBool,
    fail_page: AtomicBool,
}

impl CountingStore {
    pub fn new(events: Vec<Event>) -> Self {
        Self { inner: MemoryStore::with_events(events), ..Self::default() }
    }

    pub fn fail_count(&self, fail: bool) {
        self.fail_count.store(fail, Ordering::SeqCst);
    }

    pub fn fail_page(&self, fail: bool) {
        self.fail_page.store(fail, Ordering::SeqCst);
    }

    pub fn count_calls(&self) -> usize {
        self.count_calls.load(Ordering::SeqCst)
    }

    pub fn page_calls(&self) -> usize {
        self.page_calls.load(Ordering::SeqCst)
    }

    pub fn filter_calls(&self) -> usize {
        self.filter_calls.load(Ordering::SeqCst)
    }
}

fn down() -> StoreError {
    StoreError::Unavailable("connection refused".to_owned())
}

#[async_trait]
impl EventStore for CountingStore {
    async fn count(&self) -> Result<u64, StoreError> {
        self.count_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_count.load(Ordering::SeqCst) {
            return Err(down());
        }
        self.inner.count().await
    }

    async fn page(
        &self,
        page_index: u32,
        page_size: u32,
        sort: SortSpec,
    ) -> Result<Vec<Event>, StoreError> {
        self.page_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_page.load(Ordering::SeqCst) {
            return Err(down());
        }
        self.inner.page(page_index, page_size, sort).await
    }

    async fn filter(
        &self,
        filter: &EventFilter,
        page_index: u32,
        page_size: u32,
    ) -> Result<Vec<Event>, StoreError> {
        self.filter_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.filter(filter, page_index, page_size).await
    }

    async fn count_matching(&self, filter: &EventFilter) -> Result<u64, StoreError> {
        self.inner.count_matching(filter).await
    }

    async fn get(&self, id: &str) -> Result<Option<Event>, StoreError> {
        self.inner.get(id).await
    }

    async fn insert(&self, event: &Event) -> Result<(), StoreError> {
        self.inner.insert(event).await
    }
}

/// Cache backend over `MemoryCache` whose GET and PUT paths can be broken.
pub struct FlakyCache {
    inner: MemoryCache,
    fail_get: AtomicBool,
    fail_put: AtomicBool,
    fail_admin: AtomicBool,
    failed: AtomicUsize,
}

impl FlakyCache {
    pub fn new(clock: std::sync::Arc<ManualClock>) -> Self {
        Self {
            inner: MemoryCache::new(clock),
            fail_get: AtomicBool::new(false),
            fail_put: AtomicBool::new(false),
            fail_admin: AtomicBool::new(false),
            failed: AtomicUsize::new(0),
        }
    }

    /// Every operation fails.
    pub fn failing() -> Self {
        let cache = Self::new(std::sync::Arc::new(ManualClock::new(noon())));
        cache.fail_get(true);
        cache.fail_put(true);
        cache.fail_admin.store(true, Ordering::SeqCst);
        cache
    }

    pub fn fail_get(&self, fail: bool) {
        self.fail_get.store(fail, Ordering::SeqCst);
    }

    pub fn fail_put(&self, fail: bool) {
        self.fail_put.store(fail, Ordering::SeqCst);
    }

    pub fn failed_ops(&self) -> usize {
        self.failed.load(Ordering::SeqCst)
    }

    fn check(&self, flag: &AtomicBool) -> Result<(), CacheError> {
        if flag.load(Ordering::SeqCst) {
            self.failed.fetch_add(1, Ordering::SeqCst);
            return Err(CacheError::Unavailable("connection reset by peer".to_owned()));
        }
        Ok(())
    }
}

#[async_trait]
impl CacheBackend for FlakyCache {
    async fn get(&self, region: &str, key: &str) -> Result<Option<String>, CacheError> {
        self.check(&self.fail_get)?;
        self.inner.get(region, key).await
    }

    async fn put(
        &self,
        region: &str,
        key: &str,
        value: String,
        ttl: Duration,
    ) -> Result<(), CacheError> {
        self.check(&self.fail_put)?;
        self.inner.put(region, key, value, ttl).await
    }

    async fn evict(&self, region: &str, key: &str) -> Result<(), CacheError> {
        self.check(&self.fail_admin)?;
        self.inner.evict(region, key).await
    }

    async fn clear(&self, region: &str) -> Result<(), CacheError> {
        self.check(&self.fail_admin)?;
        self.inner.clear(region).await
    }
}

