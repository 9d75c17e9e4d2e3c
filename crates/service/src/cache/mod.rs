//! Cache-aside layer.
//!
//! `CacheBackend` is the failable storage seam, `MemoryCache` the in-process
//! backend with lazy expiry, and `CacheRegion` the typed wrapper that applies the
//! degrade-on-failure policy: a failed read falls through to computation, a failed
//! write is skipped, and neither ever reaches the caller.

mod backend;
mod memory;
mod region;

pub use backend::{CacheBackend, CacheError};
pub use memory::MemoryCache;
pub use region::CacheRegion;
