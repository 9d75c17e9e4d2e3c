use std::sync::Arc;
use std::time::Duration;

use newsdash_core::{Event, EventFilter, MAX_PAGE_SIZE, Page, SEARCH_CACHE_REGION, SortSpec};
use newsdash_storage::{EventStore, StoreError};

use crate::ServiceError;
use crate::cache::{CacheBackend, CacheRegion};

/// News listing, lookup and text search.
///
/// Search pages go through the `news-search` cache region; plain listings are always
/// read live so the dashboard sees new events immediately.
pub struct NewsService {
    store: Arc<dyn EventStore>,
    search_cache: CacheRegion<Page<Event>>,
}

fn check_page_size(size: u32) -> Result<(), ServiceError> {
    if size == 0 || size > MAX_PAGE_SIZE {
        return Err(ServiceError::InvalidInput(format!(
            "page size must be between 1 and {MAX_PAGE_SIZE}, got {size}"
        )));
    }
    Ok(())
}

fn search_cache_key(text: &str, page: u32, size: u32) -> String {
    format!("{}-{page}-{size}", text.trim().to_lowercase())
}

impl NewsService {
    #[must_use]
    pub fn new(
        store: Arc<dyn EventStore>,
        cache_backend: Arc<dyn CacheBackend>,
        search_ttl: Duration,
    ) -> Self {
        Self { store, search_cache: CacheRegion::new(cache_backend, SEARCH_CACHE_REGION, search_ttl) }
    }

    pub async fn list(&self, page: u32, size: u32, sort: SortSpec) -> Result<Page<Event>, ServiceError> {
        check_page_size(size)?;
        let total = self.store.count().await?;
        let content = self.store.page(page, size, sort).await?;
        Ok(Page::new(content, page, size, total))
    }

    pub async fn get(&self, id: &str) -> Result<Event, ServiceError> {
        self.store.get(id).await?.ok_or_else(|| {
            ServiceError::Store(StoreError::NotFound { entity: "news", id: id.to_owned() })
        })
    }

    pub async fn search(&self, text: &str, page: u32, size: u32) -> Result<Page<Event>, ServiceError> {
        check_page_size(size)?;
        let key = search_cache_key(text, page, size);
        let filter = EventFilter::text(text);
        self.search_cache
            .try_get_or_compute(&key, || async {
                let total = self.store.count_matching(&filter).await?;
                let content = self.store.filter(&filter, page, size).await?;
                Ok::<_, ServiceError>(Page::new(content, page, size, total))
            })
            .await
    }

    /// Drop every cached search page.
    pub async fn clear_search_cache(&self) {
        self.search_cache.clear().await;
    }
}
