use candela::{
    Bar, CandelaError, CandleDuration, OrderDirection, earliest_candle_timestamp,
    query_direct_pair,
};
use candela_mock::DynamicIndexer;

use crate::helpers::{HOUR, T0, hourly};

#[tokio::test]
async fn direct_pair_query_is_filtered_and_limited() {
    let (indexer, controller) = DynamicIndexer::new_with_controller("dyn");
    let bars: Vec<Bar> = (0..10).map(|i| hourly(i, 2.0)).collect();
    controller
        .set_series("candleSticksHours", "0xaa", "0xbb", bars.clone())
        .await;

    let got = query_direct_pair(
        indexer.as_ref(),
        &CandleDuration::H1.details(),
        "0xaa",
        "0xbb",
        T0 + 2 * HOUR,
        T0 + 8 * HOUR,
        3,
    )
    .await
    .unwrap();
    // newest first, capped
    assert_eq!(got, vec![bars[8], bars[7], bars[6]]);

    let q = &controller.queries().await[0];
    assert_eq!(q.entity, "candleSticksHours");
    assert_eq!(q.period, Some((T0 + 2 * HOUR, T0 + 8 * HOUR)));
    assert_eq!(q.order, OrderDirection::Desc);
    assert_eq!(q.first, 3);
}

#[tokio::test]
async fn earliest_timestamp_is_none_without_candles() {
    let (indexer, controller) = DynamicIndexer::new_with_controller("dyn");
    let days = CandleDuration::D1.details();
    assert_eq!(
        earliest_candle_timestamp(indexer.as_ref(), &days, "0xaa", "0xbb")
            .await
            .unwrap(),
        None
    );

    controller
        .set_series(
            "candleSticksDays",
            "0xaa",
            "0xbb",
            vec![Bar::flat(T0 * 1000 + 86_400_000, 1.0), Bar::flat(T0 * 1000, 1.0)],
        )
        .await;
    assert_eq!(
        earliest_candle_timestamp(indexer.as_ref(), &days, "0xaa", "0xbb")
            .await
            .unwrap(),
        Some(T0)
    );
}

#[tokio::test]
async fn transport_errors_propagate_unwrapped() {
    let (indexer, controller) = DynamicIndexer::new_with_controller("dyn");
    let err = CandelaError::transport("dyn", "502 bad gateway");
    controller
        .set_behavior("0xaa", "0xbb", candela_mock::MockBehavior::Fail(err.clone()))
        .await;
    let got = query_direct_pair(
        indexer.as_ref(),
        &CandleDuration::M1.details(),
        "0xaa",
        "0xbb",
        0,
        60,
        10,
    )
    .await
    .unwrap_err();
    assert_eq!(got, err);
}
