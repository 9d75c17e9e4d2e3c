//! Test utilities and module declarations for storage tests.

use chrono::{Duration, TimeZone as _, Utc};
use newsdash_core::Event;

pub fn event_at(id: &str, category: Option<&str>, minutes_ago_from_noon: i64) -> Event {
    let noon = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let ts = noon - Duration::minutes(minutes_ago_from_noon);
    Event::new(
        id,
        format!("Title {id}"),
        format!("Body of {id}"),
        category.map(str::to_owned),
        Some(ts.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)),
    )
}

mod memory_tests;
#[cfg(feature = "sqlite")]
mod sqlite_tests;
