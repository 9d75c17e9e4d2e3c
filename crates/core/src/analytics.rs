use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Dashboard analytics snapshot.
///
/// Always built whole by the aggregation engine and cached as one value.
///
/// Wire names follow the dashboard contract, not the Rust field names:
/// `ingestion_throughput_per_hour` is `ingestionThroughput` and `events_last_24_hours`
/// is `totalEventsInLast24Hours`, the keys the dashboard's stat cards read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsStats {
    pub total_events: u64,
    pub events_last_hour: u64,
    pub unique_categories: u64,
    pub category_distribution: HashMap<String, u64>,
    /// Events per hour, rounded to two decimals.
    #[serde(rename = "ingestionThroughput")]
    pub ingestion_throughput_per_hour: f64,
    #[serde(rename = "totalEventsInLast24Hours")]
    pub events_last_24_hours: u64,
}

impl AnalyticsStats {
    /// Assemble a snapshot; `unique_categories` is always derived from the distribution.
    pub fn new(
        total_events: u64,
        window: WindowEstimate,
        category_distribution: HashMap<String, u64>,
    ) -> Self {
        Self {
            total_events,
            events_last_hour: window.last_hour,
            unique_categories: category_distribution.len() as u64,
            category_distribution,
            ingestion_throughput_per_hour: ingestion_throughput(window),
            events_last_24_hours: window.last_24_hours,
        }
    }
}

/// Approximate counts for the trailing 1 h and 24 h windows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowEstimate {
    pub last_hour: u64,
    pub last_24_hours: u64,
    /// The sample was entirely inside the 24 h window and the 24 h figure was replaced
    /// by the store total.
    pub saturated: bool,
}

/// Events per hour derived from the window estimate.
///
/// Averages the 24 h count over 24 hours; falls back to the last-hour count when the
/// 24 h window is empty.
pub fn ingestion_throughput(window: WindowEstimate) -> f64 {
    let per_hour = if window.last_24_hours > 0 {
        window.last_24_hours as f64 / 24.0
    } else {
        window.last_hour as f64
    };
    round2(per_hour)
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
