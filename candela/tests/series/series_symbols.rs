use std::sync::Arc;

use candela::{CandelaError, CandleDuration};
use candela_mock::MockIndexer;
use candela_mock::fixtures::series::FIXTURE_START;
use candela_mock::fixtures::tokens::{DOC, SOV, XUSD};

use crate::helpers::{assert_gap_free, builder};

#[tokio::test]
async fn direct_symbol_yields_gap_free_series() {
    let indexer = Arc::new(MockIndexer::new());
    let series = builder(indexer.clone()).build().unwrap();
    let h1 = CandleDuration::H1;

    let out = series
        .bars("SOV/XUSD", h1, FIXTURE_START, FIXTURE_START + 48 * 3600)
        .await
        .unwrap();

    // the first fixture candle sits one period after FIXTURE_START
    assert_eq!(out.first().map(|b| b.time), Some((FIXTURE_START + 3600) * 1000));
    assert_eq!(out.len(), 48);
    assert_gap_free(&out, h1.details().period_ms());
    assert!(
        indexer
            .queries()
            .iter()
            .all(|q| q.base_token == SOV && q.quote_token == XUSD)
    );
}

#[tokio::test]
async fn cross_symbol_is_composed_through_reference() {
    let indexer = Arc::new(MockIndexer::new());
    let series = builder(indexer.clone()).build().unwrap();
    let d1 = CandleDuration::D1;

    let out = series
        .bars("sov/doc", d1, FIXTURE_START, FIXTURE_START + 30 * 86_400)
        .await
        .unwrap();

    assert!(!out.is_empty());
    assert_gap_free(&out, d1.details().period_ms());
    // SOV trades at half a DOC throughout the fixtures
    assert!(out.iter().all(|b| (b.close - 0.5).abs() < 1e-9), "{out:?}");
    assert!(indexer.queries().iter().all(|q| q.quote_token == XUSD));
    assert!(indexer.queries().iter().any(|q| q.base_token == DOC));
}

#[tokio::test]
async fn bad_symbols_are_request_errors() {
    let series = builder(Arc::new(MockIndexer::new())).build().unwrap();
    let err = series
        .bars("SOVXUSD", CandleDuration::H1, 0, 3600)
        .await
        .unwrap_err();
    assert!(matches!(err, CandelaError::Request(_)));
    assert!(matches!(err.root(), CandelaError::InvalidArg(_)));

    let err = series
        .bars("ABC/XUSD", CandleDuration::H1, 0, 3600)
        .await
        .unwrap_err();
    assert!(matches!(err.root(), CandelaError::NotFound { .. }));
}
