//! Per-call time bound for any event store.
//!
//! A call that does not finish within the bound fails with `StoreError::Timeout`,
//! which callers treat the same as an unreachable store.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use newsdash_core::{Event, EventFilter, SortSpec};

use crate::error::StoreError;
use crate::traits::EventStore;

#[derive(Debug)]
pub struct TimeoutStore<S> {
    inner: S,
    timeout: Duration,
}

impl<S: EventStore> TimeoutStore<S> {
    pub const fn new(inner: S, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    async fn bounded<T>(
        &self,
        op: &'static str,
        fut: impl Future<Output = Result<T, StoreError>> + Send,
    ) -> Result<T, StoreError> {
        tokio::time::timeout(self.timeout, fut).await.unwrap_or_else(|_| {
            tracing::warn!(op, timeout_ms = self.timeout.as_millis() as u64, "event store call timed out");
            Err(StoreError::Timeout(self.timeout))
        })
    }
}

#[async_trait]
impl<S: EventStore> EventStore for TimeoutStore<S> {
    async fn count(&self) -> Result<u64, StoreError> {
        self.bounded("count", self.inner.count()).await
    }

    async fn page(
        &self,
        page_index: u32,
        page_size: u32,
        sort: SortSpec,
    ) -> Result<Vec<Event>, StoreError> {
        self.bounded("page", self.inner.page(page_index, page_size, sort)).await
    }

    async fn filter(
        &self,
        filter: &EventFilter,
        page_index: u32,
        page_size: u32,
    ) -> Result<Vec<Event>, StoreError> {
        self.bounded("filter", self.inner.filter(filter, page_index, page_size)).await
    }

    async fn count_matching(&self, filter: &EventFilter) -> Result<u64, StoreError> {
        self.bounded("count_matching", self.inner.count_matching(filter)).await
    }

    async fn get(&self, id: &str) -> Result<Option<Event>, StoreError> {
        self.bounded("get", self.inner.get(id)).await
    }

    async fn insert(&self, event: &Event) -> Result<(), StoreError> {
        self.bounded("insert", self.inner.insert(event)).await
    }
}
