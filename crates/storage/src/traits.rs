//! Event store trait abstraction
//!
//! The only primitives the analytics core relies on are `count` and `page`;
//! no windowed-count or aggregation capability is assumed.

use async_trait::async_trait;
use newsdash_core::{Event, EventFilter, MAX_PAGE_SIZE, SortSpec};

use crate::error::StoreError;

/// Read/write access to stored news events.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Total events ever stored.
    async fn count(&self) -> Result<u64, StoreError>;

    /// One page of events in `sort` order. `page_size` is capped at `MAX_PAGE_SIZE`.
    async fn page(
        &self,
        page_index: u32,
        page_size: u32,
        sort: SortSpec,
    ) -> Result<Vec<Event>, StoreError>;

    /// One page of events matching `filter`, newest first.
    async fn filter(
        &self,
        filter: &EventFilter,
        page_index: u32,
        page_size: u32,
    ) -> Result<Vec<Event>, StoreError>;

    /// Number of events matching `filter`.
    async fn count_matching(&self, filter: &EventFilter) -> Result<u64, StoreError>;

    /// Get an event by id.
    async fn get(&self, id: &str) -> Result<Option<Event>, StoreError>;

    /// Store a new event. Fails with `Duplicate` if the id is taken.
    async fn insert(&self, event: &Event) -> Result<(), StoreError>;
}

/// Offset and limit for a page request, with the page size capped.
pub fn page_bounds(page_index: u32, page_size: u32) -> (usize, usize) {
    let limit = page_size.min(MAX_PAGE_SIZE) as usize;
    (page_index as usize * limit, limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_bounds_caps_size() {
        assert_eq!(page_bounds(0, 5000), (0, 1000));
        assert_eq!(page_bounds(3, 10), (30, 10));
        assert_eq!(page_bounds(2, 0), (0, 0));
    }
}
