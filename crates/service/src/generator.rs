//! Synthetic news feed for demos and local development.
//!
//! A producer task emits one event per tick into an mpsc channel; an indexer task
//! drains the channel into the event store. Neither task is part of the analytics
//! path, so their failures are logged and never surface to API callers.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use newsdash_core::Event;
use newsdash_storage::EventStore;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use uuid::Uuid;

pub const CATEGORIES: [&str; 5] = ["Technology", "Sports", "Finance", "Health", "Entertainment"];

pub const TITLES: [&str; 10] = [
    "New breakthrough in AI research",
    "Local team wins championship",
    "Stock market reaches all-time high",
    "New study on the benefits of sleep",
    "Hollywood star announces new project",
    "SpaceX launches new satellite",
    "Green energy initiative launched",
    "Cybersecurity threats on the rise",
    "Olympic games set to begin",
    "Innovative tech gadget unveiled",
];

const CHANNEL_CAPACITY: usize = 64;

/// Build one synthetic article stamped at `now`.
///
/// Title and category are picked from the id's random bytes.
pub fn synthesize(id: Uuid, now: DateTime<Utc>) -> Event {
    let bytes = id.as_bytes();
    let title = TITLES[usize::from(bytes[0]) % TITLES.len()];
    let category = CATEGORIES[usize::from(bytes[1]) % CATEGORIES.len()];
    Event::new(
        id.to_string(),
        format!("{title} [{category}]"),
        format!(
            "This is a generated news article about {} in the {} sector.",
            title.to_lowercase(),
            category.to_lowercase()
        ),
        Some(category.to_owned()),
        Some(now.to_rfc3339_opts(SecondsFormat::Millis, true)),
    )
}

pub fn random_event() -> Event {
    synthesize(Uuid::new_v4(), Utc::now())
}

/// Handles for the running producer and indexer tasks.
pub struct FeedHandles {
    pub producer: JoinHandle<()>,
    pub indexer: JoinHandle<u64>,
}

impl FeedHandles {
    pub fn abort(&self) {
        self.producer.abort();
        self.indexer.abort();
    }
}

/// Start the synthetic feed: one event every `every`, indexed into `store`.
pub fn start_feed(store: Arc<dyn EventStore>, every: Duration) -> FeedHandles {
    let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
    tracing::info!(interval_ms = every.as_millis() as u64, "starting synthetic news feed");
    FeedHandles { producer: spawn_producer(tx, every), indexer: spawn_indexer(store, rx) }
}

/// Emit `random_event()` on every tick until the receiver is dropped.
pub fn spawn_producer(tx: mpsc::Sender<Event>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every.max(Duration::from_millis(1)));
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            let event = random_event();
            tracing::debug!(id = %event.id, title = %event.title, "generated news event");
            if tx.send(event).await.is_err() {
                tracing::debug!("news feed receiver closed, stopping producer");
                break;
            }
        }
    })
}

/// Insert every received event into `store`; returns how many were stored once the
/// channel closes.
pub fn spawn_indexer(store: Arc<dyn EventStore>, mut rx: mpsc::Receiver<Event>) -> JoinHandle<u64> {
    tokio::spawn(async move {
        let mut indexed = 0u64;
        while let Some(event) = rx.recv().await {
            match store.insert(&event).await {
                Ok(()) => {
                    indexed += 1;
                    tracing::info!(id = %event.id, category = ?event.category, "indexed news event");
                },
                Err(e) => {
                    tracing::warn!(id = %event.id, error = %e, "failed to index news event");
                },
            }
        }
        indexed
    })
}
