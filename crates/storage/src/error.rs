//! Typed error enum for the storage layer.
//!
//! Lets callers tell "the store is down" (degrade) apart from "the row is not there"
//! (404) without downcasting.

use std::time::Duration;

use thiserror::Error;

/// Storage-layer error with variants covering every expected failure mode.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Row not found for expected-present entity.
    #[error("not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    /// Unique constraint violation (event id reused).
    #[error("duplicate: {0}")]
    Duplicate(String),

    /// Backend refused or could not serve the call.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Call did not finish within the configured bound.
    #[error("store call timed out after {0:?}")]
    Timeout(Duration),

    /// SQL / connection failure.
    #[cfg(feature = "sqlite")]
    #[error("database error: {0}")]
    Database(#[source] rusqlite::Error),

    /// Connection pool exhausted or broken.
    #[cfg(feature = "sqlite")]
    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),
}

impl StoreError {
    /// Whether the store as a whole is unreachable, as opposed to a per-request problem.
    pub fn is_unavailable(&self) -> bool {
        match self {
            Self::Unavailable(_) | Self::Timeout(_) => true,
            #[cfg(feature = "sqlite")]
            Self::Database(_) | Self::Pool(_) => true,
            _ => false,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate(_))
    }
}

/// Custom `From<rusqlite::Error>` — NOT blanket `#[from]`.
///
/// - `QueryReturnedNoRows` → `NotFound` (callers remap with entity context)
/// - primary key / unique violation → `Duplicate`
/// - everything else → `Database`
#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::QueryReturnedNoRows => {
                Self::NotFound { entity: "row", id: "unknown".into() }
            },
            rusqlite::Error::SqliteFailure(e, msg)
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Self::Duplicate(msg.clone().unwrap_or_else(|| e.to_string()))
            },
            _ => Self::Database(err),
        }
    }
}
