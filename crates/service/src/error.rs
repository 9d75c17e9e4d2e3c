//! Typed error enum for the service layer.

use newsdash_storage::StoreError;
use thiserror::Error;

/// Service-layer error. The analytics path never produces one; only news lookups do.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Store operation failed (unavailable, timeout, not found, etc.).
    #[error("store: {0}")]
    Store(#[from] StoreError),

    /// Caller provided invalid input (bad sort spec, oversized page).
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl ServiceError {
    /// Whether this error represents a not-found condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Store(e) if e.is_not_found())
    }

    /// Whether the store behind the service is unreachable.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Store(e) if e.is_unavailable())
    }
}
