use candela_core::{
    Bar, CandelaError, CandleDetails, TimestampChunk, dedup_sorted,
    split_period_to_chunks_with_size,
};

use crate::CandleSeries;
use crate::fetch::direct::query_direct_pair;

impl CandleSeries {
    /// Row cap for a query over `[start, end]`: `candle_limit`, raised to the
    /// number of period starts the range can hold.
    pub(crate) fn row_limit(&self, details: &CandleDetails, start: i64, end: i64) -> u32 {
        let slots = (end - start).max(0).div_euclid(details.candle_seconds()) + 1;
        self.cfg
            .candle_limit
            .max(u32::try_from(slots).unwrap_or(u32::MAX))
    }

    /// Fetch one chunk, directly or through the reference asset.
    ///
    /// Both ends of `chunk` are inclusive.
    ///
    /// # Errors
    /// Propagates the underlying fetch error.
    pub async fn fetch_chunk(
        &self,
        details: &CandleDetails,
        direct: bool,
        base_token: &str,
        quote_token: &str,
        chunk: TimestampChunk,
    ) -> Result<Vec<Bar>, CandelaError> {
        if direct {
            query_direct_pair(
                self.indexer.as_ref(),
                details,
                base_token,
                quote_token,
                chunk.from,
                chunk.to,
                self.row_limit(details, chunk.from, chunk.to),
            )
            .await
        } else {
            self.query_custom_pairs(details, base_token, quote_token, chunk.from, chunk.to)
                .await
        }
    }

    /// Split `[start, end]` into chunks, fetch them all concurrently and merge.
    ///
    /// Every chunk but the last is queried without its upper boundary, which
    /// the next chunk starts on, so no candle is requested twice and none is
    /// cut by the row cap. The result is ascending by time with one bar per
    /// timestamp.
    ///
    /// # Errors
    /// The first failing chunk fails the whole call.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "candela::fetch::query_pair_by_chunks",
            skip_all,
            fields(
                direct = direct,
                base = base_token,
                quote = quote_token,
                start = start,
                end = end
            ),
        )
    )]
    pub async fn query_pair_by_chunks(
        &self,
        details: &CandleDetails,
        direct: bool,
        base_token: &str,
        quote_token: &str,
        start: i64,
        end: i64,
    ) -> Result<Vec<Bar>, CandelaError> {
        let chunks = split_period_to_chunks_with_size(start, end, details, self.cfg.chunk_size);
        #[cfg(feature = "tracing")]
        tracing::debug!(chunks = chunks.len(), "fetching candle chunks");

        let last = chunks.len().saturating_sub(1);
        let tasks = chunks.into_iter().enumerate().map(|(i, chunk)| {
            let chunk = if i < last {
                TimestampChunk {
                    from: chunk.from,
                    to: chunk.to - 1,
                }
            } else {
                chunk
            };
            self.fetch_chunk(details, direct, base_token, quote_token, chunk)
        });
        let parts = futures::future::try_join_all(tasks).await?;
        Ok(dedup_sorted(parts.into_iter().flatten().collect()))
    }
}
