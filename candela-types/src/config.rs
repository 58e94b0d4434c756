//! Configuration shared by the series builder and its collaborators.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{CHUNK_SIZE, CandelaError};

/// Global configuration for the candle series builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandelaConfig {
    /// Maximum number of candles covered by one indexer query.
    pub chunk_size: u32,
    /// Row cap (`first:`) sent with every indexer query.
    pub candle_limit: u32,
    /// Asset every pool on the indexer is quoted against; synthetic pairs are
    /// derived through it.
    pub reference_asset: String,
    /// Quote assets that have a native indexer feed. Pairs quoted in anything
    /// else are composed from two reference-quoted series.
    pub direct_quote_assets: Vec<String>,
    /// Optional deadline for a whole `query_candles` call.
    pub request_timeout: Option<Duration>,
}

impl Default for CandelaConfig {
    fn default() -> Self {
        Self {
            chunk_size: CHUNK_SIZE,
            candle_limit: CHUNK_SIZE,
            reference_asset: "XUSD".to_string(),
            direct_quote_assets: vec!["RBTC".to_string(), "XUSD".to_string()],
            request_timeout: None,
        }
    }
}

impl CandelaConfig {
    /// True when pairs quoted in `quote_asset` are served natively by the indexer.
    #[must_use]
    pub fn has_direct_feed(&self, quote_asset: &str) -> bool {
        self.direct_quote_assets
            .iter()
            .any(|a| a.eq_ignore_ascii_case(quote_asset))
    }

    /// Check numeric limits and the reference asset.
    ///
    /// # Errors
    /// Returns `InvalidArg` for a zero chunk size, a zero candle limit, or an
    /// empty reference asset.
    pub fn validate(&self) -> Result<(), CandelaError> {
        if self.chunk_size == 0 {
            return Err(CandelaError::InvalidArg("chunk_size must be positive".into()));
        }
        if self.candle_limit == 0 {
            return Err(CandelaError::InvalidArg("candle_limit must be positive".into()));
        }
        if self.reference_asset.trim().is_empty() {
            return Err(CandelaError::InvalidArg("reference_asset is empty".into()));
        }
        Ok(())
    }
}
