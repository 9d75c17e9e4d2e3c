//! Trailing-window counts approximated from a bounded recent sample.
//!
//! The store has no range query, so the estimator reads the newest `SAMPLE_SIZE`
//! events and counts those inside each window. Accuracy bound: once more than
//! `SAMPLE_SIZE` events arrive within 24 hours the sample is saturated, the 24 h
//! figure is replaced by the store total, and the 1 h figure is capped at the
//! sample size.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use newsdash_core::{
    Event, ONE_DAY_SECS, ONE_HOUR_SECS, SAMPLE_SIZE, SortSpec, WindowEstimate, parsed_timestamps,
};
use newsdash_storage::EventStore;

/// Produces 1 h / 24 h counts ending at `now`.
///
/// `total` is the store's event count as already read by the caller; implementations
/// may use it as an upper bound or a fallback. Never fails.
#[async_trait]
pub trait WindowEstimator: Send + Sync {
    async fn estimate(&self, now: DateTime<Utc>, total: u64) -> WindowEstimate;
}

pub struct SamplingWindowEstimator {
    store: Arc<dyn EventStore>,
    sample_size: u32,
}

impl SamplingWindowEstimator {
    pub fn new(store: Arc<dyn EventStore>) -> Self {
        Self { store, sample_size: SAMPLE_SIZE }
    }

    #[must_use]
    pub fn with_sample_size(mut self, sample_size: u32) -> Self {
        self.sample_size = sample_size;
        self
    }
}

#[async_trait]
impl WindowEstimator for SamplingWindowEstimator {
    async fn estimate(&self, now: DateTime<Utc>, total: u64) -> WindowEstimate {
        match self.store.page(0, self.sample_size, SortSpec::NEWEST_FIRST).await {
            Ok(sample) => estimate_from_sample(&sample, now, total, self.sample_size),
            Err(e) => {
                tracing::warn!(error = %e, "error calculating time-based metrics, using defaults");
                WindowEstimate {
                    last_hour: 0,
                    last_24_hours: total.min(u64::from(self.sample_size)),
                    saturated: false,
                }
            },
        }
    }
}

/// Count sample events strictly inside `(now - 1h, now)` and `(now - 24h, now)`.
///
/// Saturation: a full sample lying entirely inside the 24 h window means recent
/// volume exceeds what the sample can show, so the 24 h figure becomes `total`.
pub fn estimate_from_sample(
    sample: &[Event],
    now: DateTime<Utc>,
    total: u64,
    sample_size: u32,
) -> WindowEstimate {
    let hour_ago = now - Duration::seconds(ONE_HOUR_SECS);
    let day_ago = now - Duration::seconds(ONE_DAY_SECS);

    let (last_hour, last_24_hours) =
        parsed_timestamps(sample).filter(|ts| *ts < now).fold((0u64, 0u64), |(h, d), ts| {
            (h + u64::from(ts > hour_ago), d + u64::from(ts > day_ago))
        });

    let saturated = sample_size > 0
        && sample.len() == sample_size as usize
        && last_24_hours == sample.len() as u64;

    if saturated {
        tracing::debug!(sample = sample.len(), total, "sample saturated by last 24h, using total");
        WindowEstimate { last_hour, last_24_hours: total.max(last_24_hours), saturated }
    } else {
        WindowEstimate { last_hour, last_24_hours, saturated }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{CountingStore, at, events_minutes_ago, noon};
    use newsdash_storage::MemoryStore;

    #[test]
    fn counts_each_window() {
        let sample = events_minutes_ago(&[1, 30, 59, 61, 600, 1439, 1441, 5000]);
        let est = estimate_from_sample(&sample, noon(), 8, 1000);
        assert_eq!(est.last_hour, 3);
        assert_eq!(est.last_24_hours, 6);
        assert!(!est.saturated);
    }

    #[test]
    fn window_bounds_are_exclusive() {
        let now = noon();
        let sample = vec![
            at("exact-now", now),
            at("exact-hour", now - Duration::hours(1)),
            at("exact-day", now - Duration::hours(24)),
            at("future", now + Duration::minutes(5)),
        ];
        let est = estimate_from_sample(&sample, now, 4, 1000);
        assert_eq!(est.last_hour, 0);
        assert_eq!(est.last_24_hours, 1);
    }

    #[test]
    fn malformed_timestamps_count_as_non_matching() {
        let mut sample = events_minutes_ago(&[5, 10]);
        sample.push(Event::new("bad", "t", "b", None, Some("31/12/2023".to_owned())));
        sample.push(Event::new("none", "t", "b", None, None));
        let est = estimate_from_sample(&sample, noon(), 4, 1000);
        assert_eq!(est.last_hour, 2);
        assert_eq!(est.last_24_hours, 2);
    }

    #[test]
    fn full_recent_sample_saturates_to_total() {
        let minutes: Vec<i64> = (0..1000).map(|i| i + 1).collect();
        let sample = events_minutes_ago(&minutes);
        let est = estimate_from_sample(&sample, noon(), 5000, 1000);
        assert!(est.saturated);
        assert_eq!(est.last_24_hours, 5000);
        assert_eq!(est.last_hour, 59);
    }

    #[test]
    fn full_sample_with_one_old_event_is_not_saturated() {
        let mut minutes: Vec<i64> = (1..1000).collect();
        minutes.push(2000);
        let sample = events_minutes_ago(&minutes);
        let est = estimate_from_sample(&sample, noon(), 5000, 1000);
        assert!(!est.saturated);
        assert_eq!(est.last_24_hours, 999);
    }

    #[test]
    fn short_sample_never_saturates() {
        let sample = events_minutes_ago(&[1, 2, 3]);
        let est = estimate_from_sample(&sample, noon(), 3, 1000);
        assert!(!est.saturated);
        assert!(est.last_hour <= est.last_24_hours);
    }

    #[tokio::test]
    async fn estimator_reads_newest_sample_from_store() {
        let store = Arc::new(MemoryStore::with_events(events_minutes_ago(&[2, 5, 90, 120, 3000])));
        let estimator = SamplingWindowEstimator::new(store).with_sample_size(3);
        let est = estimator.estimate(noon(), 5).await;
        assert!(est.saturated);
        assert_eq!(est.last_hour, 2);
        assert_eq!(est.last_24_hours, 5);
    }

    #[tokio::test]
    async fn store_failure_falls_back_to_capped_total() {
        let store = Arc::new(CountingStore::new(events_minutes_ago(&[1, 2])));
        store.fail_page(true);
        let estimator = SamplingWindowEstimator::new(store.clone()).with_sample_size(3);
        let est = estimator.estimate(noon(), 10).await;
        assert_eq!(est, WindowEstimate { last_hour: 0, last_24_hours: 3, saturated: false });
        assert_eq!(store.page_calls(), 1);
    }
}
