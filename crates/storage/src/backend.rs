//! Unified event store backend with enum dispatch.

#[cfg(feature = "sqlite")]
use std::path::Path;

use async_trait::async_trait;
use newsdash_core::{Event, EventFilter, SortSpec};

use crate::error::StoreError;
use crate::memory::MemoryStore;
use crate::traits::EventStore;

macro_rules! dispatch {
    ($self:expr, $method:ident ( $($arg:expr),* $(,)? )) => {
        match $self {
            StoreBackend::Memory(s) => <MemoryStore as EventStore>::$method(s, $($arg),*).await,
            #[cfg(feature = "sqlite")]
            StoreBackend::Sqlite(s) => <crate::SqliteStore as EventStore>::$method(s, $($arg),*).await,
        }
    };
}

#[derive(Debug)]
pub enum StoreBackend {
    Memory(MemoryStore),
    #[cfg(feature = "sqlite")]
    Sqlite(crate::SqliteStore),
}

impl StoreBackend {
    pub fn new_memory() -> Self {
        Self::Memory(MemoryStore::new())
    }

    #[cfg(feature = "sqlite")]
    pub fn new_sqlite(db_path: &Path, pool_size: u32) -> Result<Self, StoreError> {
        Ok(Self::Sqlite(crate::SqliteStore::new(db_path, pool_size)?))
    }

    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Memory(_) => "memory",
            #[cfg(feature = "sqlite")]
            Self::Sqlite(_) => "sqlite",
        }
    }
}

#[async_trait]
impl EventStore for StoreBackend {
    async fn count(&self) -> Result<u64, StoreError> {
        dispatch!(self, count())
    }

    async fn page(
        &self,
        page_index: u32,
        page_size: u32,
        sort: SortSpec,
    ) -> Result<Vec<Event>, StoreError> {
        dispatch!(self, page(page_index, page_size, sort))
    }

    async fn filter(
        &self,
        filter: &EventFilter,
        page_index: u32,
        page_size: u32,
    ) -> Result<Vec<Event>, StoreError> {
        dispatch!(self, filter(filter, page_index, page_size))
    }

    async fn count_matching(&self, filter: &EventFilter) -> Result<u64, StoreError> {
        dispatch!(self, count_matching(filter))
    }

    async fn get(&self, id: &str) -> Result<Option<Event>, StoreError> {
        dispatch!(self, get(id))
    }

    async fn insert(&self, event: &Event) -> Result<(), StoreError> {
        dispatch!(self, insert(event))
    }
}
