use candela::{CandleDuration, Selection};
use candela_mock::DynamicIndexer;

use crate::helpers::{HOUR, T0, hourly, series};

#[tokio::test]
async fn five_thousand_hours_issue_five_contiguous_queries() {
    let (indexer, controller) = DynamicIndexer::new_with_controller("dyn");
    let series = series(indexer);
    let hours = CandleDuration::H1.details();

    let bars = series
        .query_pair_by_chunks(&hours, true, "0xaa", "0xbb", 0, 5000 * HOUR)
        .await
        .unwrap();
    assert!(bars.is_empty());

    let mut periods: Vec<(i64, i64)> = controller
        .queries()
        .await
        .into_iter()
        .filter_map(|q| q.period)
        .collect();
    assert_eq!(periods.len(), 5);
    periods.sort_unstable();
    assert_eq!(periods[0].0, 0);
    assert_eq!(periods[4].1, 5000 * HOUR);
    // each boundary belongs to the later chunk only
    for w in periods.windows(2) {
        assert_eq!(w[0].1 + 1, w[1].0);
    }
    assert!(periods.iter().all(|(from, to)| (to - from) / HOUR <= 1000));
}

#[tokio::test]
async fn chunk_results_are_merged_in_time_order() {
    let (indexer, controller) = DynamicIndexer::new_with_controller("dyn");
    let bars: Vec<_> = (0..30).map(|i| hourly(i, 1.0 + i as f64)).collect();
    controller
        .set_series("candleSticksHours", "0xaa", "0xbb", bars.clone())
        .await;
    let series = crate::helpers::builder(indexer).chunk_size(10).build().unwrap();

    let got = series
        .query_pair_by_chunks(
            &CandleDuration::H1.details(),
            true,
            "0xaa",
            "0xbb",
            T0,
            T0 + 29 * HOUR,
        )
        .await
        .unwrap();
    assert_eq!(got, bars);
    assert_eq!(controller.query_count().await, 3);
}

#[tokio::test]
async fn full_chunks_keep_their_oldest_candle() {
    let (indexer, controller) = DynamicIndexer::new_with_controller("dyn");
    let bars: Vec<_> = (0..=20).map(|i| hourly(i, 1.0 + i as f64)).collect();
    controller
        .set_series("candleSticksHours", "0xaa", "0xbb", bars.clone())
        .await;
    let series = crate::helpers::builder(indexer)
        .chunk_size(10)
        .candle_limit(10)
        .build()
        .unwrap();

    let got = series
        .query_pair_by_chunks(
            &CandleDuration::H1.details(),
            true,
            "0xaa",
            "0xbb",
            T0,
            T0 + 20 * HOUR,
        )
        .await
        .unwrap();
    // neither chunk loses its oldest candle to the row cap
    assert_eq!(got, bars);

    let mut caps: Vec<((i64, i64), u32)> = controller
        .queries()
        .await
        .into_iter()
        .filter_map(|q| q.period.map(|p| (p, q.first)))
        .collect();
    caps.sort_unstable();
    assert_eq!(
        caps,
        vec![
            ((T0, T0 + 10 * HOUR - 1), 10),
            ((T0 + 10 * HOUR, T0 + 20 * HOUR), 11),
        ]
    );
}

#[tokio::test]
async fn query_candles_resolves_earliest_before_fetching() {
    let (indexer, controller) = DynamicIndexer::new_with_controller("dyn");
    let series = series(indexer);
    let out = series
        .query_candles(&CandleDuration::H1.details(), true, "0xaa", "0xbb", 0, 5000 * HOUR)
        .await
        .unwrap();

    let queries = controller.queries().await;
    assert_eq!(queries.len(), 6);
    assert_eq!(queries[0].selection, Selection::PeriodStart);
    // no data at all: the window is seeded with zero bars
    assert_eq!(out.len(), 5001);
    assert!(out.iter().all(|b| b.close == 0.0));
}
