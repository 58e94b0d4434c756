//! Re-export of foundational types from `candela-types`.
// Consolidated re-exports so downstream crates can depend on `candela-core` only

pub use candela_types::{
    Bar, CHUNK_SIZE, CandelaConfig, CandelaError, CandleDetails, CandleDuration, HistoryDepth,
    Pair, PairKey, ResolutionBack, TimestampChunk,
};
