//! Time-series utilities used by the series builder.
//!
//! Modules include:
//! - `chunk`: split a request window into indexer-sized sub-ranges
//! - `compose`: derive a synthetic pair from two legs sharing a reference asset
//! - `fill`: produce a gap-free, continuous bar series over a requested window
//! - `util`: ordering and contiguity helpers
/// Request window chunking.
pub mod chunk;
/// Cross-rate composition of two series.
pub mod compose;
/// Gap filling and bar stitching.
pub mod fill;
/// Ordering and contiguity helpers.
pub mod util;
