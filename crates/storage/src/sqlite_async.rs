//! Async `EventStore` implementation for `SqliteStore` via `spawn_blocking`.

use async_trait::async_trait;
use newsdash_core::{Event, EventFilter, SortSpec};

use crate::error::StoreError;
use crate::sqlite::SqliteStore;
use crate::traits::EventStore;

/// Helper: run a blocking closure on the tokio blocking pool.
async fn blocking<F, T>(f: F) -> Result<T, StoreError>
where
    F: FnOnce() -> Result<T, StoreError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| StoreError::Unavailable(format!("spawn_blocking join error: {e}")))?
}

#[async_trait]
impl EventStore for SqliteStore {
    async fn count(&self) -> Result<u64, StoreError> {
        let s = self.clone();
        blocking(move || s.count()).await
    }

    async fn page(
        &self,
        page_index: u32,
        page_size: u32,
        sort: SortSpec,
    ) -> Result<Vec<Event>, StoreError> {
        let s = self.clone();
        blocking(move || s.page(page_index, page_size, sort)).await
    }

    async fn filter(
        &self,
        filter: &EventFilter,
        page_index: u32,
        page_size: u32,
    ) -> Result<Vec<Event>, StoreError> {
        let s = self.clone();
        let filter = filter.clone();
        blocking(move || s.filter(&filter, page_index, page_size)).await
    }

    async fn count_matching(&self, filter: &EventFilter) -> Result<u64, StoreError> {
        let s = self.clone();
        let filter = filter.clone();
        blocking(move || s.count_matching(&filter)).await
    }

    async fn get(&self, id: &str) -> Result<Option<Event>, StoreError> {
        let s = self.clone();
        let id = id.to_owned();
        blocking(move || s.get(&id)).await
    }

    async fn insert(&self, event: &Event) -> Result<(), StoreError> {
        let s = self.clone();
        let event = event.clone();
        blocking(move || s.insert(&event)).await
    }
}
