use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use newsdash_core::AnalyticsStats;

use crate::AppState;

/// Always 200: the stats path degrades instead of failing.
pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<AnalyticsStats> {
    Json(state.stats_service.get_stats().await)
}
