use std::sync::Arc;
use std::time::Duration;

use candela::{CandelaError, CandleDuration, CandleRecord};
use candela_mock::{DynamicIndexer, MockBehavior, MockIndexer};
use serde_json::json;

use crate::helpers::{HOUR, T0, builder, series};

#[tokio::test]
async fn transport_failure_is_wrapped_once() {
    let (indexer, controller) = DynamicIndexer::new_with_controller("dyn");
    controller
        .set_behavior(
            "0xaa",
            "0xbb",
            MockBehavior::Fail(CandelaError::transport("dyn", "indexer unavailable")),
        )
        .await;
    let err = series(indexer)
        .query_candles(&CandleDuration::H1.details(), true, "0xaa", "0xbb", T0, T0 + 10 * HOUR)
        .await
        .unwrap_err();

    assert!(matches!(err, CandelaError::Request(_)));
    assert_eq!(err.to_string(), "Request error: dyn failed: indexer unavailable");
    assert!(matches!(err.root(), CandelaError::Transport { .. }));
}

#[tokio::test]
async fn malformed_record_fails_the_request() {
    let (indexer, controller) = DynamicIndexer::new_with_controller("dyn");
    let bad: CandleRecord = serde_json::from_value(json!({
        "open": "not a number",
        "high": "1",
        "low": "1",
        "close": "1",
        "periodStartUnix": T0
    }))
    .unwrap();
    controller
        .set_behavior("0xaa", "0xbb", MockBehavior::Rows(vec![bad]))
        .await;

    let err = series(indexer)
        .query_candles(&CandleDuration::H1.details(), true, "0xaa", "0xbb", T0, T0 + 10 * HOUR)
        .await
        .unwrap_err();
    match err.root() {
        CandelaError::MalformedCandleRecord { field, .. } => assert_eq!(field, "open"),
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn failing_chunk_fails_the_whole_request() {
    let indexer = Arc::new(MockIndexer::new());
    let series = builder(indexer).build().unwrap();
    let err = series
        .bars("FAIL/XUSD", CandleDuration::M15, T0, T0 + 5000 * 900)
        .await
        .unwrap_err();
    assert!(matches!(err.root(), CandelaError::Transport { .. }));
}

#[tokio::test(start_paused = true)]
async fn request_deadline_surfaces_as_timeout() {
    let (indexer, controller) = DynamicIndexer::new_with_controller("dyn");
    controller.set_behavior("0xaa", "0xbb", MockBehavior::Hang).await;
    let series = builder(indexer)
        .request_timeout(Duration::from_secs(2))
        .build()
        .unwrap();

    let err = series
        .query_candles(&CandleDuration::H1.details(), true, "0xaa", "0xbb", T0, T0 + 10 * HOUR)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        CandelaError::request(CandelaError::request_timeout("candles"))
    );
}

#[tokio::test(start_paused = true)]
async fn slow_indexer_within_deadline_succeeds() {
    let (indexer, controller) = DynamicIndexer::new_with_controller("dyn");
    controller
        .set_behavior("0xaa", "0xbb", MockBehavior::Delay(Duration::from_millis(500)))
        .await;
    let series = builder(indexer)
        .request_timeout(Duration::from_secs(2))
        .build()
        .unwrap();
    let out = series
        .query_candles(&CandleDuration::H1.details(), true, "0xaa", "0xbb", T0, T0 + 10 * HOUR)
        .await
        .unwrap();
    assert_eq!(out.len(), 11);
}
