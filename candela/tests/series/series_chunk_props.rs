use candela::CandleDuration;
use candela_mock::DynamicIndexer;
use proptest::prelude::*;

use crate::helpers::{T0, builder};

proptest! {
    #![proptest_config(ProptestConfig { cases: 32, .. ProptestConfig::default() })]
    #[test]
    fn chunk_queries_tile_the_window(periods in 1i64..400, chunk_size in 1u32..60) {
        tokio_test::block_on(async move {
            let (indexer, controller) = DynamicIndexer::new_with_controller("dyn");
            let series = builder(indexer).chunk_size(chunk_size).build().unwrap();
            let m15 = CandleDuration::M15.details();
            let end = T0 + periods * m15.candle_seconds();

            series
                .query_pair_by_chunks(&m15, true, "0xaa", "0xbb", T0, end)
                .await
                .unwrap();

            let mut windows: Vec<(i64, i64)> = controller
                .queries()
                .await
                .into_iter()
                .filter_map(|q| q.period)
                .collect();
            windows.sort_unstable();

            let size = i64::from(chunk_size);
            let expected = if periods <= size { 1 } else { (periods + size - 1) / size };
            assert_eq!(i64::try_from(windows.len()).unwrap(), expected);
            assert_eq!(windows.first().map(|w| w.0), Some(T0));
            assert_eq!(windows.last().map(|w| w.1), Some(end));
            for w in windows.windows(2) {
                assert_eq!(w[0].1 + 1, w[1].0);
            }
        });
    }
}
