//! In-memory event store.
//!
//! Keeps events in insertion order behind a `RwLock`; sorting happens per request.
//! Events with a missing or malformed sort key always sort last, and ties go to the
//! most recently inserted event, matching the `SQLite` store's `seq DESC`.

use std::cmp::Ordering;

use async_trait::async_trait;
use newsdash_core::{Event, EventFilter, SortDirection, SortField, SortSpec, parse_timestamp};
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::traits::{EventStore, page_bounds};

#[derive(Debug, Default)]
pub struct MemoryStore {
    events: RwLock<Vec<Event>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_events(events: Vec<Event>) -> Self {
        Self { events: RwLock::new(events) }
    }
}

fn compare_present<T: Ord>(a: Option<T>, b: Option<T>, direction: SortDirection) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => match direction {
            SortDirection::Asc => a.cmp(&b),
            SortDirection::Desc => b.cmp(&a),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn compare(a: &Event, b: &Event, sort: SortSpec) -> Ordering {
    match sort.field {
        SortField::Timestamp => compare_present(
            parse_timestamp(a.timestamp.as_deref()).ok(),
            parse_timestamp(b.timestamp.as_deref()).ok(),
            sort.direction,
        ),
        SortField::Title => {
            compare_present(Some(a.title.as_str()), Some(b.title.as_str()), sort.direction)
        },
        SortField::Category => compare_present(a.category_name(), b.category_name(), sort.direction),
    }
}

fn take_page(mut events: Vec<Event>, page_index: u32, page_size: u32) -> Vec<Event> {
    let (offset, limit) = page_bounds(page_index, page_size);
    if offset >= events.len() {
        return Vec::new();
    }
    events.drain(offset..).take(limit).collect()
}

#[async_trait]
impl EventStore for MemoryStore {
    async fn count(&self) -> Result<u64, StoreError> {
        Ok(self.events.read().await.len() as u64)
    }

    async fn page(
        &self,
        page_index: u32,
        page_size: u32,
        sort: SortSpec,
    ) -> Result<Vec<Event>, StoreError> {
        let mut events: Vec<Event> = self.events.read().await.iter().rev().cloned().collect();
        events.sort_by(|a, b| compare(a, b, sort));
        Ok(take_page(events, page_index, page_size))
    }

    async fn filter(
        &self,
        filter: &EventFilter,
        page_index: u32,
        page_size: u32,
    ) -> Result<Vec<Event>, StoreError> {
        let mut matching: Vec<Event> =
            self.events.read().await.iter().rev().filter(|e| filter.matches(e)).cloned().collect();
        matching.sort_by(|a, b| compare(a, b, SortSpec::NEWEST_FIRST));
        Ok(take_page(matching, page_index, page_size))
    }

    async fn count_matching(&self, filter: &EventFilter) -> Result<u64, StoreError> {
        Ok(self.events.read().await.iter().filter(|e| filter.matches(e)).count() as u64)
    }

    async fn get(&self, id: &str) -> Result<Option<Event>, StoreError> {
        Ok(self.events.read().await.iter().find(|e| e.id == id).cloned())
    }

    async fn insert(&self, event: &Event) -> Result<(), StoreError> {
        let mut events = self.events.write().await;
        if events.iter().any(|e| e.id == event.id) {
            return Err(StoreError::Duplicate(format!("event id {}", event.id)));
        }
        events.push(event.clone());
        Ok(())
    }
}
