//! `SQLite` event store.
//!
//! All methods are synchronous; `sqlite_async` bridges them onto the blocking pool.
//! Timestamps keep the text the producer wrote in `datetime`; ordering uses the
//! parsed `datetime_ms` key, so malformed or missing values sort last like the
//! in-memory store.

// SQLite uses i64 for counts/limits, Rust uses usize - safe conversions within DB context
#![allow(
    clippy::as_conversions,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    reason = "SQLite i64 <-> Rust usize conversions are safe within DB row counts"
)]

mod migrations;

use std::path::Path;

use newsdash_core::{Event, EventFilter, SortDirection, SortField, SortSpec, parse_timestamp};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{Connection, OptionalExtension as _, params};

use crate::error::StoreError;
use crate::traits::page_bounds;

/// Type alias for pooled connection
pub(crate) type PooledConn = PooledConnection<SqliteConnectionManager>;

const EVENT_COLUMNS: &str = "id, title, body, category, datetime";

/// Event store wrapping a `SQLite` connection pool
#[derive(Clone, Debug)]
pub struct SqliteStore {
    pub(crate) pool: Pool<SqliteConnectionManager>,
}

fn map_event(row: &rusqlite::Row<'_>) -> rusqlite::Result<Event> {
    Ok(Event {
        id: row.get(0)?,
        title: row.get(1)?,
        body: row.get(2)?,
        category: row.get(3)?,
        timestamp: row.get(4)?,
    })
}

/// Log row read errors and filter them out
fn log_row_error<T>(result: rusqlite::Result<T>) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::warn!("Row read error: {}", e);
            None
        },
    }
}

/// Escape special characters for LIKE pattern matching
fn escape_like_pattern(s: &str) -> String {
    s.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}

/// `%needle%` for a non-blank search text, lowercased to match `lower(column)`.
fn like_pattern(filter: &EventFilter) -> Option<String> {
    filter
        .text
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| format!("%{}%", escape_like_pattern(&t.to_lowercase())))
}

const FILTER_WHERE: &str = "
    WHERE (?1 IS NULL
           OR lower(title) LIKE ?1 ESCAPE '\\'
           OR lower(body) LIKE ?1 ESCAPE '\\'
           OR lower(IFNULL(category, '')) LIKE ?1 ESCAPE '\\')
      AND (?2 IS NULL OR category = ?2)";

/// Epoch milliseconds of a stored timestamp; `None` for missing or malformed text.
pub(crate) fn timestamp_sort_key(datetime: Option<&str>) -> Option<i64> {
    parse_timestamp(datetime).ok().map(|ts| ts.timestamp_millis())
}

fn order_clause(sort: SortSpec) -> String {
    let column = match sort.field {
        SortField::Timestamp => "datetime_ms",
        SortField::Title => "title",
        SortField::Category => "NULLIF(category, '')",
    };
    let direction = match sort.direction {
        SortDirection::Asc => "ASC",
        SortDirection::Desc => "DESC",
    };
    format!("ORDER BY {column} {direction} NULLS LAST, seq DESC")
}

/// Concurrency settings for every pooled connection
fn init_connection(conn: &mut Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "PRAGMA busy_timeout = 5000;
         PRAGMA journal_mode = WAL;
         PRAGMA synchronous = NORMAL;",
    )
}

impl SqliteStore {
    /// Open (or create) the database at `db_path` and run migrations.
    pub fn new(db_path: &Path, pool_size: u32) -> Result<Self, StoreError> {
        let manager = SqliteConnectionManager::file(db_path).with_init(init_connection);
        let pool = Pool::builder().max_size(pool_size.max(1)).build(manager)?;

        let conn = pool.get()?;
        migrations::run_migrations(&conn)?;
        drop(conn);

        tracing::info!(pool_size, path = %db_path.display(), "Event store initialized");

        Ok(Self { pool })
    }

    fn conn(&self) -> Result<PooledConn, StoreError> {
        Ok(self.pool.get()?)
    }

    pub fn count(&self) -> Result<u64, StoreError> {
        let conn = self.conn()?;
        let total: i64 = conn.query_row("SELECT COUNT(*) FROM events", [], |row| row.get(0))?;
        Ok(total as u64)
    }

    pub fn page(
        &self,
        page_index: u32,
        page_size: u32,
        sort: SortSpec,
    ) -> Result<Vec<Event>, StoreError> {
        let (offset, limit) = page_bounds(page_index, page_size);
        let conn = self.conn()?;
        let sql = format!(
            "SELECT {EVENT_COLUMNS} FROM events {} LIMIT ?1 OFFSET ?2",
            order_clause(sort)
        );
        let mut stmt = conn.prepare(&sql)?;
        let events = stmt
            .query_map(params![limit as i64, offset as i64], map_event)?
            .filter_map(log_row_error)
            .collect();
        Ok(events)
    }

    pub fn filter(
        &self,
        filter: &EventFilter,
        page_index: u32,
        page_size: u32,
    ) -> Result<Vec<Event>, StoreError> {
        let (offset, limit) = page_bounds(page_index, page_size);
        let conn = self.conn()?;
        let sql = format!(
            "SELECT {EVENT_COLUMNS} FROM events {FILTER_WHERE} {} LIMIT ?3 OFFSET ?4",
            order_clause(SortSpec::NEWEST_FIRST)
        );
        let mut stmt = conn.prepare(&sql)?;
        let events = stmt
            .query_map(
                params![like_pattern(filter), filter.category, limit as i64, offset as i64],
                map_event,
            )?
            .filter_map(log_row_error)
            .collect();
        Ok(events)
    }

    pub fn count_matching(&self, filter: &EventFilter) -> Result<u64, StoreError> {
        let conn = self.conn()?;
        let sql = format!("SELECT COUNT(*) FROM events {FILTER_WHERE}");
        let total: i64 = conn.query_row(
            &sql,
            params![like_pattern(filter), filter.category],
            |row| row.get(0),
        )?;
        Ok(total as u64)
    }

    pub fn get(&self, id: &str) -> Result<Option<Event>, StoreError> {
        let conn = self.conn()?;
        let sql = format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = ?1");
        Ok(conn.query_row(&sql, params![id], map_event).optional()?)
    }

    pub fn insert(&self, event: &Event) -> Result<(), StoreError> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO events (id, title, body, category, datetime, datetime_ms)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                event.id,
                event.title,
                event.body,
                event.category,
                event.timestamp,
                timestamp_sort_key(event.timestamp.as_deref()),
            ],
        )?;
        Ok(())
    }
}
