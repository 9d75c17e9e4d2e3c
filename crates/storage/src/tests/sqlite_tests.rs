use newsdash_core::{Event, EventFilter, SortSpec};
use tempfile::TempDir;

use super::event_at;
use crate::{EventStore, MemoryStore, SqliteStore, StoreError};

#[expect(clippy::unwrap_used, reason = "test code")]
fn create_test_store() -> (SqliteStore, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let store = SqliteStore::new(&db_path, 2).unwrap();
    (store, temp_dir)
}

#[test]
fn count_page_and_get_roundtrip() {
    let (store, _dir) = create_test_store();
    store.insert(&event_at("a", Some("Health"), 90)).unwrap();
    store.insert(&event_at("b", Some("Sports"), 10)).unwrap();
    store.insert(&Event::new("c", "No date", "x", None, None)).unwrap();

    assert_eq!(store.count().unwrap(), 3);
    let ids: Vec<_> = store
        .page(0, 10, SortSpec::NEWEST_FIRST)
        .unwrap()
        .into_iter()
        .map(|e| e.id)
        .collect();
    assert_eq!(ids, ["b", "a", "c"]);

    let fetched = store.get("a").unwrap().unwrap();
    assert_eq!(fetched.category.as_deref(), Some("Health"));
    assert!(store.get("zzz").unwrap().is_none());
}

#[test]
fn duplicate_id_maps_to_duplicate() {
    let (store, _dir) = create_test_store();
    store.insert(&event_at("a", None, 0)).unwrap();
    let err = store.insert(&event_at("a", None, 5)).unwrap_err();
    assert!(err.is_duplicate(), "got {err:?}");
}

#[test]
fn filter_matches_text_and_escapes_wildcards() {
    let (store, _dir) = create_test_store();
    store.insert(&Event::new("1", "Stock market reaches all-time high", "b", Some("Finance".into()), None)).unwrap();
    store.insert(&Event::new("2", "100% renewable grid", "b", Some("Health".into()), None)).unwrap();
    store.insert(&Event::new("3", "Local team wins", "b", Some("Sports".into()), None)).unwrap();

    let hits = store.filter(&EventFilter::text("STOCK"), 0, 10).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "1");

    let pct = store.filter(&EventFilter::text("100%"), 0, 10).unwrap();
    assert_eq!(pct.len(), 1);
    assert_eq!(store.count_matching(&EventFilter::text("%")).unwrap(), 1);

    let by_category = EventFilter { text: None, category: Some("Sports".into()) };
    assert_eq!(store.count_matching(&by_category).unwrap(), 1);
    assert_eq!(store.count_matching(&EventFilter::default()).unwrap(), 3);
}

#[test]
fn reopening_keeps_data() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("reopen.db");
    SqliteStore::new(&db_path, 1).unwrap().insert(&event_at("keep", None, 0)).unwrap();
    let store = SqliteStore::new(&db_path, 1).unwrap();
    assert_eq!(store.count().unwrap(), 1);
}

#[tokio::test]
async fn async_trait_delegates_to_blocking_pool() {
    let (store, _dir) = create_test_store();
    EventStore::insert(&store, &event_at("x", Some("Tech"), 3)).await.unwrap();
    assert_eq!(EventStore::count(&store).await.unwrap(), 1);
    let err = EventStore::insert(&store, &event_at("x", None, 3)).await.unwrap_err();
    assert!(matches!(err, StoreError::Duplicate(_)));
}

fn newest_first_ids(store: &SqliteStore) -> Vec<String> {
    store.page(0, 10, SortSpec::NEWEST_FIRST).unwrap().into_iter().map(|e| e.id).collect()
}

#[test]
fn newest_first_orders_by_instant_not_text() {
    let (store, _dir) = create_test_store();
    store.insert(&Event::new("real", "t", "b", None, Some("2024-05-01T11:59:00.000Z".into()))).unwrap();
    store.insert(&Event::new("garbage", "t", "b", None, Some("yesterday".into()))).unwrap();
    // 10:30Z, earlier than `real` although its text sorts higher.
    store.insert(&Event::new("offset", "t", "b", None, Some("2024-05-01T12:30:00+02:00".into()))).unwrap();
    store.insert(&Event::new("missing", "t", "b", None, None)).unwrap();

    assert_eq!(newest_first_ids(&store), ["real", "offset", "missing", "garbage"]);

    let oldest_first: Vec<_> = store
        .page(0, 10, "datetime,asc".parse().unwrap())
        .unwrap()
        .into_iter()
        .map(|e| e.id)
        .collect();
    assert_eq!(&oldest_first[..2], ["offset", "real"]);
}

#[tokio::test]
async fn sqlite_and_memory_agree_on_newest_first() {
    let (sqlite, _dir) = create_test_store();
    let memory = MemoryStore::new();
    let events = [
        Event::new("a", "t", "b", None, Some("2024-05-01T09:00:00Z".into())),
        Event::new("b", "t", "b", None, Some("not a date".into())),
        Event::new("c", "t", "b", None, Some("2024-05-01T13:00:00+03:00".into())),
        event_at("d", None, 5),
        Event::new("e", "t", "b", None, None),
    ];
    for event in &events {
        sqlite.insert(event).unwrap();
        EventStore::insert(&memory, event).await.unwrap();
    }
    let from_memory: Vec<_> = EventStore::page(&memory, 0, 10, SortSpec::NEWEST_FIRST)
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.id)
        .collect();
    assert_eq!(newest_first_ids(&sqlite), from_memory);
    assert_eq!(from_memory, ["d", "c", "a", "e", "b"]);
}

#[test]
fn malformed_rows_do_not_crowd_out_recent_sample() {
    let (store, _dir) = create_test_store();
    store.insert(&Event::new("bad", "t", "b", None, Some("yesterday".into()))).unwrap();
    for i in 0..5 {
        store.insert(&event_at(&format!("e{i}"), None, i)).unwrap();
    }
    let sample = store.page(0, 5, SortSpec::NEWEST_FIRST).unwrap();
    assert!(sample.iter().all(|e| e.id != "bad"));
}

#[test]
fn upgrade_backfills_sort_key_for_existing_rows() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("legacy.db");
    {
        let conn = rusqlite::Connection::open(&db_path).unwrap();
        conn.execute_batch(
            "CREATE TABLE events (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                id TEXT NOT NULL UNIQUE,
                title TEXT NOT NULL,
                body TEXT NOT NULL,
                category TEXT,
                datetime TEXT
            );
            INSERT INTO events (id, title, body, datetime) VALUES
                ('old', 't', 'b', '2024-05-01T08:00:00Z'),
                ('junk', 't', 'b', 'zzz'),
                ('new', 't', 'b', '2024-05-01T11:00:00Z');
            PRAGMA user_version = 2;",
        )
        .unwrap();
    }

    let store = SqliteStore::new(&db_path, 1).unwrap();
    assert_eq!(newest_first_ids(&store), ["new", "old", "junk"]);
}
