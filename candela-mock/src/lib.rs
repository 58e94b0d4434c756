//! In-memory candle indexers for tests and examples.
//!
//! - [`MockIndexer`] serves deterministic fixture series for a handful of
//!   fixture tokens (see [`fixtures::tokens`]).
//! - [`DynamicIndexer`] is driven by an [`IndexerController`]: tests load series,
//!   force failures or hangs per pair, and inspect every query received.
use std::sync::Mutex;

use async_trait::async_trait;
use candela_core::{
    Bar, CandelaError, CandleQuery, CandleRecord, IndexerClient, OrderDirection, Selection,
};

mod dynamic;
pub mod fixtures;

pub use dynamic::{DynamicIndexer, IndexerController, MockBehavior};

/// Answer `query` from an in-memory series the way the indexer would.
///
/// Applies the period filter, ordering and row cap, and renders the selected fields.
#[must_use]
pub fn serve(query: &CandleQuery, bars: &[Bar]) -> Vec<CandleRecord> {
    let mut hits: Vec<&Bar> = bars
        .iter()
        .filter(|b| query.covers(b.time.div_euclid(1000)))
        .collect();
    hits.sort_by_key(|b| b.time);
    if query.order == OrderDirection::Desc {
        hits.reverse();
    }
    hits.into_iter()
        .take(usize::try_from(query.first).unwrap_or(usize::MAX))
        .map(|b| match query.selection {
            Selection::Ohlcv => CandleRecord::from_bar(b),
            Selection::PeriodStart => CandleRecord {
                period_start_unix: CandleRecord::from_bar(b).period_start_unix,
                ..CandleRecord::default()
            },
        })
        .collect()
}

/// Mock indexer for CI-safe examples. Provides deterministic data from static fixtures.
#[derive(Default)]
pub struct MockIndexer {
    queries: Mutex<Vec<CandleQuery>>,
}

impl MockIndexer {
    /// Create a fixture-backed indexer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every query received so far, in arrival order.
    #[must_use]
    pub fn queries(&self) -> Vec<CandleQuery> {
        self.queries
            .lock()
            .map(|q| q.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl IndexerClient for MockIndexer {
    fn name(&self) -> &'static str {
        "candela-mock"
    }

    async fn candles(&self, query: &CandleQuery) -> Result<Vec<CandleRecord>, CandelaError> {
        if let Ok(mut log) = self.queries.lock() {
            log.push(query.clone());
        }
        if query.base_token == fixtures::tokens::FAIL
            || query.quote_token == fixtures::tokens::FAIL
        {
            return Err(CandelaError::transport(
                self.name(),
                format!("forced failure: {}", query.entity),
            ));
        }
        Ok(
            fixtures::series::by_pair(&query.entity, &query.base_token, &query.quote_token)
                .map(|bars| serve(query, &bars))
                .unwrap_or_default(),
        )
    }
}
