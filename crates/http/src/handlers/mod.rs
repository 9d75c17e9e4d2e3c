#![allow(clippy::shadow_reuse, reason = "Shadowing for Arc clones is idiomatic")]

pub mod analytics;
pub mod news;
