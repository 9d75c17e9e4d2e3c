use std::collections::HashMap;
use std::sync::Arc;

use newsdash_core::{AnalyticsStats, Clock, Event, SAMPLE_SIZE, SortSpec};
use newsdash_storage::EventStore;

use crate::estimator::{SamplingWindowEstimator, WindowEstimator};

/// Computes dashboard analytics from the event store.
///
/// Stateless between calls: every `compute_stats` is a fresh read-compute-return
/// cycle, so concurrent use needs no coordination. Store failures degrade the
/// output (zeros, fallback estimates, empty distribution) and never the call.
pub struct AnalyticsEngine {
    store: Arc<dyn EventStore>,
    estimator: Arc<dyn WindowEstimator>,
    clock: Arc<dyn Clock>,
}

impl AnalyticsEngine {
    #[must_use]
    pub fn new(
        store: Arc<dyn EventStore>,
        estimator: Arc<dyn WindowEstimator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { store, estimator, clock }
    }

    /// Engine using the bounded-sample window estimator over the same store.
    #[must_use]
    pub fn sampling(store: Arc<dyn EventStore>, clock: Arc<dyn Clock>) -> Self {
        let estimator = Arc::new(SamplingWindowEstimator::new(Arc::clone(&store)));
        Self::new(store, estimator, clock)
    }

    pub async fn compute_stats(&self) -> AnalyticsStats {
        tracing::debug!("calculating analytics statistics from event store");

        let total_events = self.store.count().await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "event count unavailable, reporting zero");
            0
        });

        let window = self.estimator.estimate(self.clock.now(), total_events).await;
        let category_distribution = self.category_distribution().await;

        let stats = AnalyticsStats::new(total_events, window, category_distribution);
        tracing::debug!(
            total = stats.total_events,
            last_hour = stats.events_last_hour,
            last_24h = stats.events_last_24_hours,
            saturated = window.saturated,
            categories = stats.unique_categories,
            throughput_per_hour = stats.ingestion_throughput_per_hour,
            "analytics calculated"
        );
        stats
    }

    async fn category_distribution(&self) -> HashMap<String, u64> {
        match self.store.page(0, SAMPLE_SIZE, SortSpec::NEWEST_FIRST).await {
            Ok(sample) => group_by_category(&sample),
            Err(e) => {
                tracing::warn!(error = %e, "category sample unavailable, reporting no categories");
                HashMap::new()
            },
        }
    }
}

/// Count events per non-empty category.
pub(crate) fn group_by_category(events: &[Event]) -> HashMap<String, u64> {
    events.iter().filter_map(Event::category_name).fold(HashMap::new(), |mut acc, category| {
        *acc.entry(category.to_owned()).or_insert(0) += 1;
        acc
    })
}
