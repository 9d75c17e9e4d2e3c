//! Migration v3: numeric sort key for `datetime`
//!
//! `datetime` holds whatever text the producer sent, so ordering it directly puts
//! malformed values first and mixes offsets. `datetime_ms` is the parsed instant
//! in epoch milliseconds, NULL when the text is missing or unparseable.

use rusqlite::{Connection, params};

use super::column_helpers::add_column_if_not_exists;
use crate::sqlite::timestamp_sort_key;

const INDEX_SQL: &str = "
DROP INDEX IF EXISTS idx_events_datetime;
CREATE INDEX IF NOT EXISTS idx_events_datetime_ms ON events(datetime_ms DESC);
";

pub(super) fn run(conn: &Connection) -> Result<(), rusqlite::Error> {
    add_column_if_not_exists(conn, "events", "datetime_ms", "INTEGER")?;

    let rows: Vec<(i64, Option<String>)> = {
        let mut stmt = conn.prepare("SELECT seq, datetime FROM events WHERE datetime IS NOT NULL")?;
        let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?.collect::<Result<_, _>>()?;
        rows
    };
    let mut update = conn.prepare("UPDATE events SET datetime_ms = ?1 WHERE seq = ?2")?;
    for (seq, datetime) in &rows {
        update.execute(params![timestamp_sort_key(datetime.as_deref()), seq])?;
    }
    tracing::info!(rows = rows.len(), "backfilled datetime sort keys");

    conn.execute_batch(INDEX_SQL)
}
