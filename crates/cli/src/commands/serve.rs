use std::sync::Arc;

use anyhow::Result;
use newsdash_core::SystemClock;
use newsdash_core::env_config::Settings;
use newsdash_http::{AppState, create_router, start_cache_purge};
use newsdash_service::cache::MemoryCache;
use newsdash_service::generator::start_feed;
use newsdash_service::{AnalyticsEngine, CachedStatsService, NewsService};

use crate::open_store;

pub(crate) async fn run(
    settings: &Settings,
    port: u16,
    host: String,
    memory: bool,
    with_generator: bool,
) -> Result<()> {
    let store = open_store(settings, memory)?;
    let clock = Arc::new(SystemClock);
    let cache = Arc::new(MemoryCache::new(clock.clone()));

    let engine = Arc::new(AnalyticsEngine::sampling(store.clone(), clock));
    let stats_service = Arc::new(CachedStatsService::new(engine, cache.clone(), settings.stats_ttl));
    let news_service = Arc::new(NewsService::new(store.clone(), cache.clone(), settings.search_ttl));
    start_cache_purge(cache, settings.stats_ttl);

    // Dropping the handles detaches the tasks; they run for the life of the process.
    let _feed = if with_generator {
        Some(start_feed(store, settings.generator_interval))
    } else {
        tracing::info!("synthetic news feed disabled");
        None
    };

    let state = Arc::new(AppState { stats_service, news_service });
    let router = create_router(state);
    let addr = format!("{host}:{port}");
    tracing::info!(
        stats_ttl_secs = settings.stats_ttl.as_secs(),
        search_ttl_secs = settings.search_ttl.as_secs(),
        "Starting HTTP server on {}",
        addr
    );
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
