mod commands;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use newsdash_core::env_config::Settings;
use newsdash_storage::{EventStore, StoreBackend, TimeoutStore};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "newsdash")]
#[command(about = "News event feed with cached near-real-time analytics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API (and the synthetic feed unless disabled)
    Serve {
        #[arg(short, long, default_value = "8080")]
        port: u16,
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,
        /// Keep events in memory instead of the SQLite database
        #[arg(long)]
        memory: bool,
        /// Do not start the synthetic news producer
        #[arg(long)]
        no_generator: bool,
    },
    /// Compute analytics once against the database and print them as JSON
    Stats,
    /// Insert synthetic news events into the database
    Generate {
        #[arg(short, long, default_value = "10")]
        count: usize,
    },
}

pub(crate) fn ensure_db_dir(db_path: &Path) -> Result<()> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Open the configured backend with every call bounded by the store timeout.
pub(crate) fn open_store(settings: &Settings, memory: bool) -> Result<Arc<dyn EventStore>> {
    let backend = if memory {
        StoreBackend::new_memory()
    } else {
        ensure_db_dir(&settings.db_path)?;
        StoreBackend::new_sqlite(&settings.db_path, settings.db_pool_size)?
    };
    tracing::info!(
        backend = backend.kind(),
        timeout_ms = settings.store_timeout.as_millis() as u64,
        "event store ready"
    );
    Ok(Arc::new(TimeoutStore::new(backend, settings.store_timeout)))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = Settings::from_env();

    match cli.command {
        Commands::Serve { port, host, memory, no_generator } => {
            commands::serve::run(&settings, port, host, memory, !no_generator).await?;
        },
        Commands::Stats => commands::query::run_stats(&settings).await?,
        Commands::Generate { count } => commands::query::run_generate(&settings, count).await?,
    }

    Ok(())
}
