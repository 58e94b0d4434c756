// Shared builders so tests can `use crate::helpers::*;`
use std::sync::Arc;

use candela::{Bar, CandleSeries, CandleSeriesBuilder, FixedClock, IndexerClient};
use candela_mock::fixtures::tokens;

/// Period start used by hand-built series, seconds. Aligned to a day.
pub const T0: i64 = 1_699_920_000;
pub const HOUR: i64 = 3600;
pub const HOUR_MS: i64 = 3_600_000;

/// Builder wired to `indexer`, the fixture token table and a clock far in the future.
pub fn builder(indexer: Arc<dyn IndexerClient>) -> CandleSeriesBuilder {
    CandleSeries::builder()
        .indexer(indexer)
        .token_resolver(Arc::new(tokens::resolver()))
        .clock(Arc::new(FixedClock(i64::MAX)))
}

pub fn series(indexer: Arc<dyn IndexerClient>) -> CandleSeries {
    builder(indexer).build().unwrap()
}

/// An hourly bar at `T0 + slot` hours with a flat price and some volume.
pub fn hourly(slot: i64, price: f64) -> Bar {
    Bar::new(T0 * 1000 + slot * HOUR_MS, price, price, price, price, Some(10.0))
}

pub fn assert_gap_free(bars: &[Bar], period_ms: i64) {
    for w in bars.windows(2) {
        assert_eq!(w[1].time - w[0].time, period_ms, "gap after {}", w[0].time);
        assert!(
            (w[1].open - w[0].close).abs() < 1e-12,
            "bar at {} opens at {} after close {}",
            w[1].time,
            w[1].open,
            w[0].close
        );
    }
}
