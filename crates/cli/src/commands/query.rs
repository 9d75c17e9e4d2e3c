use std::sync::Arc;

use anyhow::Result;
use newsdash_core::SystemClock;
use newsdash_core::env_config::Settings;
use newsdash_service::AnalyticsEngine;
use newsdash_service::generator::random_event;
use newsdash_storage::EventStore as _;

use crate::open_store;

pub(crate) async fn run_stats(settings: &Settings) -> Result<()> {
    let store = open_store(settings, false)?;
    let stats = AnalyticsEngine::sampling(store, Arc::new(SystemClock)).compute_stats().await;
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}

pub(crate) async fn run_generate(settings: &Settings, count: usize) -> Result<()> {
    let store = open_store(settings, false)?;
    for _ in 0..count {
        let event = random_event();
        store.insert(&event).await?;
        println!("{}", serde_json::to_string(&event)?);
    }
    tracing::info!(count, "generated news events");
    Ok(())
}
