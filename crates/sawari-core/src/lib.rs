//! Core types and pipeline logic for the Sawari transport-sentiment monitor.
//!
//! This crate holds everything with non-trivial logic: keyword
//! classification, lexicon sentiment scoring, raw-item normalisation,
//! deduplication, and the per-state aggregation math. It is deliberately
//! free of HTTP and database dependencies; the collectors and the SQLite
//! backend live in sibling crates and depend on this one.

pub mod aggregate;
pub mod classify;
pub mod dedup;
pub mod error;
pub mod normalize;
pub mod record;
pub mod sentiment;
pub mod store;

pub use error::{Error, Result};
