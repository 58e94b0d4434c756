//! Candela data transfer objects, configuration primitives, and the shared error type.
#![warn(missing_docs)]

mod bar;
mod candle;
mod config;
mod error;
mod pair;

pub use bar::Bar;
pub use candle::{
    CHUNK_SIZE, CandleDetails, CandleDuration, HistoryDepth, ResolutionBack, TimestampChunk,
};
pub use config::CandelaConfig;
pub use error::CandelaError;
pub use pair::{Pair, PairKey};
