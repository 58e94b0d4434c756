use std::collections::HashMap;

use async_trait::async_trait;

use crate::CandelaError;
use crate::query::{CandleQuery, CandleRecord};

/// Read access to the candle indexer.
///
/// Implementors own the transport (GraphQL over HTTP, a fixture table, ...).
/// A query that cannot be answered should fail with `CandelaError::Transport`;
/// an empty result is `Ok(vec![])`.
#[async_trait]
pub trait IndexerClient: Send + Sync {
    /// Stable client name used in error messages and logs.
    fn name(&self) -> &'static str;

    /// Run one candle query and return the raw records in indexer order.
    async fn candles(&self, query: &CandleQuery) -> Result<Vec<CandleRecord>, CandelaError>;
}

/// Maps a symbolic asset (e.g. `XUSD`) to its token contract address.
pub trait TokenResolver: Send + Sync {
    /// Lower-cased token address for `asset`.
    ///
    /// # Errors
    /// Returns `NotFound` when the asset is unknown.
    fn token_address(&self, asset: &str) -> Result<String, CandelaError>;
}

/// Wall-clock source. Only used to keep backfilled bars out of the future.
pub trait Clock: Send + Sync {
    /// Milliseconds since the UNIX epoch.
    fn now_millis(&self) -> i64;
}

/// The system clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// A clock frozen at a fixed instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.0
    }
}

/// Token resolver backed by a static asset → address table.
#[derive(Debug, Default, Clone)]
pub struct StaticTokenResolver {
    addresses: HashMap<String, String>,
}

impl StaticTokenResolver {
    /// Create an empty resolver.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `asset` at `address`. Asset symbols match case-insensitively.
    #[must_use]
    pub fn with_token(mut self, asset: &str, address: &str) -> Self {
        self.addresses
            .insert(asset.to_ascii_uppercase(), address.to_ascii_lowercase());
        self
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for StaticTokenResolver {
    fn from_iter<T: IntoIterator<Item = (&'a str, &'a str)>>(iter: T) -> Self {
        iter.into_iter()
            .fold(Self::new(), |r, (asset, address)| r.with_token(asset, address))
    }
}

impl TokenResolver for StaticTokenResolver {
    fn token_address(&self, asset: &str) -> Result<String, CandelaError> {
        self.addresses
            .get(&asset.to_ascii_uppercase())
            .cloned()
            .ok_or_else(|| CandelaError::not_found(format!("token address for {asset}")))
    }
}
