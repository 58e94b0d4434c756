//! candela-core
//!
//! Core types, collaborator traits, and the pure algorithms behind the candle
//! series builder.
//!
//! - `types`: re-exported data structures (bars, durations, pairs, config, errors).
//! - `connector`: the `IndexerClient`, `TokenResolver`, and `Clock` seams.
//! - `query`: the indexer query model and record normalization.
//! - `timeseries`: chunk splitting, synthetic cross-rate composition, and gap filling.
//!
//! Everything in `timeseries` is synchronous and side-effect free; the async
//! orchestration lives in the `candela` crate.
#![warn(missing_docs)]

/// Collaborator traits consumed by the series builder.
pub mod connector;
/// Indexer query documents and raw candle records.
pub mod query;
/// Time-series utilities: chunking, composition, gap filling.
pub mod timeseries;
pub mod types;

pub use connector::{
    Clock, FixedClock, IndexerClient, StaticTokenResolver, SystemClock, TokenResolver,
};
pub use query::{CandleQuery, CandleRecord, OrderDirection, Selection, rows_from_response};
pub use timeseries::chunk::{split_period_to_chunks, split_period_to_chunks_with_size};
pub use timeseries::compose::{compose_cross_rate, cross_rate};
pub use timeseries::fill::add_missing_bars;
pub use timeseries::util::{dedup_sorted, is_contiguous};
pub use types::*;
