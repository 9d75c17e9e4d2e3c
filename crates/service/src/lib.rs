//! Service layer for newsdash
//!
//! Analytics aggregation over the event store, the cache-aside layer in front of it,
//! news listing/search, and the synthetic producer feeding the store.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]

mod analytics_service;
pub mod cache;
mod error;
mod estimator;
pub mod generator;
mod news_service;
mod stats_service;
#[cfg(test)]
mod test_support;

pub use analytics_service::AnalyticsEngine;
pub use error::ServiceError;
pub use estimator::{SamplingWindowEstimator, WindowEstimator, estimate_from_sample};
pub use news_service::NewsService;
pub use stats_service::CachedStatsService;
