//! HTTP API server for newsdash.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(unreachable_pub, reason = "pub items are re-exported")]
#![allow(unused_results, reason = "Some results are intentionally ignored")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::single_call_fn, reason = "HTTP handlers are called once from router")]

pub mod api_error;
mod handlers;
mod query_types;
mod response_types;

use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, put};
use axum::{Json, Router};
use tower_http::cors::CorsLayer;

use newsdash_service::cache::MemoryCache;
use newsdash_service::{CachedStatsService, NewsService};

pub use response_types::VersionResponse;

/// Shared application state for all HTTP handlers.
pub struct AppState {
    /// Cached analytics snapshot for the dashboard
    pub stats_service: Arc<CachedStatsService>,
    /// News listing, lookup and cached search
    pub news_service: Arc<NewsService>,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/version", get(version))
        .route("/api/analytics/stats", get(handlers::analytics::get_stats))
        .route("/api/news", get(handlers::news::list_news))
        .route("/api/news/search", put(handlers::news::search_news))
        .route("/api/news/{id}", get(handlers::news::get_news))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Spawns background task that drops expired entries from the in-process cache.
///
/// Expired entries are already invisible to readers; this only bounds memory.
pub fn start_cache_purge(cache: Arc<MemoryCache>, every: Duration) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every.max(Duration::from_secs(1)));
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            let removed = cache.purge_expired().await;
            if removed > 0 {
                tracing::debug!(removed, "purged expired cache entries");
            }
        }
    });
}

async fn health() -> &'static str {
    "ok"
}

async fn version() -> Json<VersionResponse> {
    Json(VersionResponse { version: env!("CARGO_PKG_VERSION") })
}
