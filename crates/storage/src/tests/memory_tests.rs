use newsdash_core::{Event, EventFilter, SortSpec};

use super::event_at;
use crate::{EventStore, MemoryStore, StoreError};

async fn seeded() -> MemoryStore {
    let store = MemoryStore::new();
    store.insert(&event_at("old", Some("Sports"), 120)).await.unwrap();
    store.insert(&event_at("new", Some("Finance"), 1)).await.unwrap();
    store.insert(&Event::new("broken", "SpaceX launch", "b", None, Some("garbage".into()))).await.unwrap();
    store.insert(&event_at("mid", None, 30)).await.unwrap();
    store
}

#[tokio::test]
async fn page_is_newest_first_with_unparseable_last() {
    let store = seeded().await;
    let page = store.page(0, 10, SortSpec::NEWEST_FIRST).await.unwrap();
    let ids: Vec<_> = page.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, ["new", "mid", "old", "broken"]);
}

#[tokio::test]
async fn page_index_offsets_by_page_size() {
    let store = seeded().await;
    let second = store.page(1, 2, SortSpec::NEWEST_FIRST).await.unwrap();
    let ids: Vec<_> = second.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, ["old", "broken"]);
    assert!(store.page(5, 2, SortSpec::NEWEST_FIRST).await.unwrap().is_empty());
}

#[tokio::test]
async fn ascending_sort_by_title() {
    let store = seeded().await;
    let page = store.page(0, 10, "title,asc".parse().unwrap()).await.unwrap();
    assert_eq!(page[0].title, "SpaceX launch");
}

#[tokio::test]
async fn filter_and_count_matching_agree() {
    let store = seeded().await;
    let filter = EventFilter::text("finance");
    let hits = store.filter(&filter, 0, 10).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "new");
    assert_eq!(store.count_matching(&filter).await.unwrap(), 1);
}

#[tokio::test]
async fn duplicate_insert_is_rejected() {
    let store = seeded().await;
    let err = store.insert(&event_at("old", None, 0)).await.unwrap_err();
    assert!(matches!(err, StoreError::Duplicate(_)));
    assert_eq!(store.count().await.unwrap(), 4);
}

#[tokio::test]
async fn get_by_id() {
    let store = seeded().await;
    assert_eq!(store.get("mid").await.unwrap().unwrap().id, "mid");
    assert!(store.get("nope").await.unwrap().is_none());
}

#[tokio::test]
async fn ties_go_to_latest_insert() {
    let store = MemoryStore::new();
    store.insert(&Event::new("first", "t", "b", None, None)).await.unwrap();
    store.insert(&Event::new("second", "t", "b", None, Some("junk".into()))).await.unwrap();
    store.insert(&event_at("dated", None, 10)).await.unwrap();
    let ids: Vec<_> = store
        .page(0, 10, SortSpec::NEWEST_FIRST)
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.id)
        .collect();
    assert_eq!(ids, ["dated", "second", "first"]);
}
