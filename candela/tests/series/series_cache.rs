use candela::{CandleDuration, EndTimeCache, PairKey, Selection};
use candela_mock::DynamicIndexer;

use crate::helpers::{HOUR, HOUR_MS, T0, assert_gap_free, builder, hourly, series};

async fn loaded() -> (std::sync::Arc<dyn candela::IndexerClient>, candela_mock::IndexerController) {
    let (indexer, controller) = DynamicIndexer::new_with_controller("dyn");
    let bars = (10..20).map(|i| hourly(i, 5.0)).collect();
    controller
        .set_series("candleSticksHours", "0xaa", "0xbb", bars)
        .await;
    (indexer, controller)
}

#[tokio::test]
async fn earliest_is_resolved_once_and_bounds_the_series() {
    let (indexer, controller) = loaded().await;
    let series = series(indexer);
    let hours = CandleDuration::H1.details();

    let out = series
        .query_candles(&hours, true, "0xaa", "0xbb", T0, T0 + 24 * HOUR)
        .await
        .unwrap();
    assert_eq!(out.first().map(|b| b.time), Some(T0 * 1000 + 10 * HOUR_MS));
    assert_eq!(out.last().map(|b| b.time), Some(T0 * 1000 + 24 * HOUR_MS));
    assert_eq!(out.len(), 15);
    assert_gap_free(&out, HOUR_MS);
    assert_eq!(
        series.end_time_cache().get(&PairKey::new("0xaa", "0xbb")).await,
        Some(T0 + 10 * HOUR)
    );

    series
        .query_candles(&hours, true, "0xaa", "0xbb", T0, T0 + 24 * HOUR)
        .await
        .unwrap();
    let lookups = controller
        .queries()
        .await
        .into_iter()
        .filter(|q| q.selection == Selection::PeriodStart)
        .count();
    assert_eq!(lookups, 1);
    assert_eq!(controller.query_count().await, 3);
}

#[tokio::test]
async fn shared_cache_is_used_across_series() {
    let (indexer, controller) = loaded().await;
    let cache = EndTimeCache::new();
    // an earlier value stored first wins and allows backfill down to it
    cache.insert(PairKey::new("0xAA", "0xBB"), T0 + 5 * HOUR).await;

    let series = builder(indexer).end_time_cache(cache.clone()).build().unwrap();
    let out = series
        .query_candles(&CandleDuration::H1.details(), true, "0xaa", "0xbb", T0, T0 + 24 * HOUR)
        .await
        .unwrap();

    assert_eq!(out.first().map(|b| b.time), Some(T0 * 1000 + 5 * HOUR_MS));
    assert!((out[0].close - 5.0).abs() < f64::EPSILON);
    assert_eq!(controller.query_count().await, 1);
    assert_eq!(cache.get(&PairKey::new("0xaa", "0xbb")).await, Some(T0 + 5 * HOUR));
}

#[tokio::test]
async fn pairs_without_candles_are_not_cached() {
    let (indexer, _controller) = DynamicIndexer::new_with_controller("dyn");
    let series = series(indexer);
    let out = series
        .query_candles(&CandleDuration::H1.details(), true, "0xaa", "0xbb", T0, T0 + HOUR)
        .await
        .unwrap();
    assert!(out.is_empty());
    assert!(series.end_time_cache().is_empty().await);
}
