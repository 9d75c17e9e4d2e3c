//! Environment-driven runtime settings with warn-level logging for invalid values.

use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{
    DEFAULT_DB_POOL_SIZE, DEFAULT_GENERATOR_INTERVAL_SECS, DEFAULT_SEARCH_TTL_SECS,
    DEFAULT_STATS_TTL_SECS, DEFAULT_STORE_TIMEOUT_MS,
};

/// Parse an environment variable with a default fallback.
///
/// - If the variable is not set: returns `default` silently (expected case).
/// - If the variable is set but cannot be parsed: logs a warning and returns `default`.
pub fn env_parse_with_default<T: std::str::FromStr + std::fmt::Display>(
    var: &str,
    default: T,
) -> T {
    match std::env::var(var) {
        Ok(v) => match v.parse() {
            Ok(n) => n,
            Err(_) => {
                tracing::warn!(
                    var,
                    value = %v,
                    default = %default,
                    "invalid env var value, using default"
                );
                default
            },
        },
        Err(_) => default,
    }
}

/// Default on-disk location of the SQLite event store.
pub fn default_db_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("newsdash")
        .join("news.db")
}

/// Tunables read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub db_path: PathBuf,
    pub db_pool_size: u32,
    pub store_timeout: Duration,
    pub stats_ttl: Duration,
    pub search_ttl: Duration,
    pub generator_interval: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            db_pool_size: DEFAULT_DB_POOL_SIZE,
            store_timeout: Duration::from_millis(DEFAULT_STORE_TIMEOUT_MS),
            stats_ttl: Duration::from_secs(DEFAULT_STATS_TTL_SECS),
            search_ttl: Duration::from_secs(DEFAULT_SEARCH_TTL_SECS),
            generator_interval: Duration::from_secs(DEFAULT_GENERATOR_INTERVAL_SECS),
        }
    }
}

impl Settings {
    /// Build settings from `NEWSDASH_*` environment variables.
    pub fn from_env() -> Self {
        let db_path =
            std::env::var("NEWSDASH_DB_PATH").map(PathBuf::from).unwrap_or_else(|_| default_db_path());
        Self {
            db_path,
            db_pool_size: env_parse_with_default("NEWSDASH_DB_POOL_SIZE", DEFAULT_DB_POOL_SIZE),
            store_timeout: Duration::from_millis(env_parse_with_default(
                "NEWSDASH_STORE_TIMEOUT_MS",
                DEFAULT_STORE_TIMEOUT_MS,
            )),
            stats_ttl: Duration::from_secs(env_parse_with_default(
                "NEWSDASH_STATS_TTL_SECS",
                DEFAULT_STATS_TTL_SECS,
            )),
            search_ttl: Duration::from_secs(env_parse_with_default(
                "NEWSDASH_SEARCH_TTL_SECS",
                DEFAULT_SEARCH_TTL_SECS,
            )),
            generator_interval: Duration::from_secs(env_parse_with_default(
                "NEWSDASH_GENERATOR_INTERVAL_SECS",
                DEFAULT_GENERATOR_INTERVAL_SECS,
            )),
        }
    }
}
