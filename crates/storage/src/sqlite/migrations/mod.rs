#![allow(
    clippy::redundant_pub_crate,
    reason = "migrations module is private, pub(crate) is intentional"
)]

mod column_helpers;
mod v1;
mod v2;
mod v3;

use rusqlite::Connection;

pub const SCHEMA_VERSION: i32 = 3;

pub fn run_migrations(conn: &Connection) -> Result<(), rusqlite::Error> {
    let current_version: i32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;

    tracing::info!("Database schema version: {} (target: {})", current_version, SCHEMA_VERSION);

    if current_version < 1i32 {
        tracing::info!("Running migration v1: events table");
        conn.execute_batch(v1::SQL)?;
    }

    if current_version < 2i32 {
        tracing::info!("Running migration v2: datetime and category indexes");
        conn.execute_batch(v2::SQL)?;
    }

    if current_version < 3i32 {
        tracing::info!("Running migration v3: datetime sort key");
        v3::run(conn)?;
    }

    conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    Ok(())
}
