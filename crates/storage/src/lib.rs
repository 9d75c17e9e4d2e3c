//! Event store adapters for newsdash
//!
//! The analytics core only needs bulk count and paginated fetch. Backends:
//! an in-memory store for tests and ephemeral runs, and a pooled `SQLite` store.
//! `TimeoutStore` bounds every call of any backend.

mod backend;
pub mod error;
mod memory;
#[cfg(feature = "sqlite")]
mod sqlite;
#[cfg(feature = "sqlite")]
mod sqlite_async;
#[cfg(test)]
mod tests;
mod timeout;
pub mod traits;

pub use backend::StoreBackend;
pub use error::StoreError;
pub use memory::MemoryStore;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;
pub use timeout::TimeoutStore;
pub use traits::{EventStore, page_bounds};
