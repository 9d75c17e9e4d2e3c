//! Shared constants for newsdash.

/// Largest page any caller may request from the event store.
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Size of the recent-events sample used for windowed and category statistics.
pub const SAMPLE_SIZE: u32 = MAX_PAGE_SIZE;

/// Default page size for news listing endpoints.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Cache key of the current analytics snapshot.
pub const STATS_CACHE_KEY: &str = "analytics:current";

/// Cache region holding the analytics snapshot.
pub const STATS_CACHE_REGION: &str = "analytics";

/// Cache region holding paginated search results.
pub const SEARCH_CACHE_REGION: &str = "news-search";

/// Default TTL of the analytics snapshot, in seconds.
pub const DEFAULT_STATS_TTL_SECS: u64 = 30;

/// Default TTL of cached search pages, in seconds.
pub const DEFAULT_SEARCH_TTL_SECS: u64 = 300;

/// Default bound on a single event store call, in milliseconds.
pub const DEFAULT_STORE_TIMEOUT_MS: u64 = 5000;

/// Default interval between synthetic events, in seconds.
pub const DEFAULT_GENERATOR_INTERVAL_SECS: u64 = 5;

/// SQLite connection pool: default maximum connections.
pub const DEFAULT_DB_POOL_SIZE: u32 = 8;

pub const ONE_HOUR_SECS: i64 = 3600;
pub const ONE_DAY_SECS: i64 = 86_400;
