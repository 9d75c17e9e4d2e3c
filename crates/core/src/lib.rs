//! Core types and helpers for newsdash
//!
//! This crate contains domain types shared across all other crates: the stored
//! news event, the analytics snapshot served to the dashboard, the injectable
//! clock and environment-driven configuration.

mod analytics;
mod clock;
pub mod constants;
pub mod env_config;
mod error;
mod event;
mod page;
mod timestamp;

pub use analytics::*;
pub use clock::*;
pub use constants::*;
pub use error::*;
pub use event::*;
pub use page::*;
pub use timestamp::*;
