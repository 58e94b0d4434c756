//! Candela builds chart-ready candle series from a DEX candle indexer.
//!
//! Overview
//! - Splits a requested window into indexer-sized chunks and fetches them concurrently.
//! - Serves pairs with a native indexer feed directly; any other pair is composed
//!   from two series quoted against a shared reference asset.
//! - Remembers the earliest real candle of each pair in an [`EndTimeCache`] so no
//!   bars are synthesized before trading started.
//! - Fills gaps so the result is contiguous and every bar opens at the previous close.
//! - Reports every failure on the fetch path as one uniform `CandelaError::Request`.
//!
//! Examples
//! ```rust,ignore
//! use std::sync::Arc;
//! use candela::{CandleSeries, CandleDuration, EndTimeCache};
//!
//! let cache = EndTimeCache::new();
//! let series = CandleSeries::builder()
//!     .indexer(Arc::new(my_graphql_client))
//!     .token_resolver(Arc::new(my_token_table))
//!     .end_time_cache(cache.clone())
//!     .build()?;
//!
//! let bars = series
//!     .bars("SOV/XUSD", CandleDuration::H1, 1_700_000_000, 1_700_360_000)
//!     .await?;
//! ```
#![warn(missing_docs)]

pub(crate) mod cache;
pub(crate) mod core;
pub(crate) mod fetch;

pub use cache::EndTimeCache;
pub use crate::core::{CandleSeries, CandleSeriesBuilder};
pub use fetch::direct::{earliest_candle_timestamp, query_direct_pair};

pub use candela_core::{
    Bar, CHUNK_SIZE, CandelaConfig, CandelaError, CandleDetails, CandleDuration, CandleQuery,
    CandleRecord, Clock, FixedClock, HistoryDepth, IndexerClient, OrderDirection, Pair, PairKey,
    ResolutionBack, Selection, StaticTokenResolver, SystemClock, TimestampChunk, TokenResolver,
    rows_from_response,
};
