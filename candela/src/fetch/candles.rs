use candela_core::{
    Bar, CandelaError, CandleDetails, CandleDuration, Pair, PairKey, add_missing_bars,
};

use crate::CandleSeries;
use crate::fetch::direct::earliest_candle_timestamp;

/// Log a failed request and wrap it into the uniform `Request` kind.
fn report(err: CandelaError) -> CandelaError {
    #[cfg(feature = "tracing")]
    tracing::error!(target: "candela", error = %err, "candle request failed");
    CandelaError::request(err)
}

impl CandleSeries {
    /// Contiguous candle series for a pair of token addresses.
    ///
    /// Resolves (once per pair) the earliest real candle, fetches `[start, end]`
    /// (seconds) in concurrent chunks, and gap-fills the result from the later
    /// of `start` and that earliest candle. `direct` selects the native feed;
    /// otherwise the pair is composed through the reference asset.
    ///
    /// # Errors
    /// Every failure is logged and returned as `CandelaError::Request`, including
    /// `RequestTimeout` when a request deadline is configured and exceeded.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "candela::query_candles",
            skip_all,
            fields(
                entity = details.entity_name(),
                direct = direct,
                base = base_token,
                quote = quote_token,
                start = start,
                end = end,
            ),
        )
    )]
    pub async fn query_candles(
        &self,
        details: &CandleDetails,
        direct: bool,
        base_token: &str,
        quote_token: &str,
        start: i64,
        end: i64,
    ) -> Result<Vec<Bar>, CandelaError> {
        let fut = self.collect_candles(details, direct, base_token, quote_token, start, end);
        Self::with_request_deadline(self.cfg.request_timeout, "candles", fut)
            .await
            .map_err(report)
    }

    /// Contiguous candle series for a `BASE/QUOTE` chart symbol.
    ///
    /// Assets are resolved to token addresses through the configured resolver;
    /// the pair is served directly when its quote asset has a native feed.
    ///
    /// # Errors
    /// As [`query_candles`](Self::query_candles); malformed symbols and unknown
    /// assets are reported the same way.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "candela::bars",
            skip(self, duration),
            fields(duration = %duration),
        )
    )]
    pub async fn bars(
        &self,
        symbol: &str,
        duration: CandleDuration,
        start: i64,
        end: i64,
    ) -> Result<Vec<Bar>, CandelaError> {
        let (base, quote, direct) = self.resolve_symbol(symbol).map_err(report)?;
        self.query_candles(&duration.details(), direct, &base, &quote, start, end)
            .await
    }

    fn resolve_symbol(&self, symbol: &str) -> Result<(String, String, bool), CandelaError> {
        let pair = Pair::parse(symbol)?;
        let base = self.resolver.token_address(pair.base())?;
        let quote = self.resolver.token_address(pair.quote())?;
        Ok((base, quote, self.cfg.has_direct_feed(pair.quote())))
    }

    async fn collect_candles(
        &self,
        details: &CandleDetails,
        direct: bool,
        base_token: &str,
        quote_token: &str,
        start: i64,
        end: i64,
    ) -> Result<Vec<Bar>, CandelaError> {
        let earliest = self
            .earliest_real_candle(details, direct, base_token, quote_token)
            .await?;
        let bars = self
            .query_pair_by_chunks(details, direct, base_token, quote_token, start, end)
            .await?;
        let from = earliest.map_or(start, |ts| start.max(ts));
        Ok(add_missing_bars(bars, details, from, end, self.clock.now_millis()))
    }

    /// Earliest real candle of a pair, served from the end-time cache when known.
    ///
    /// Nothing is cached while the pair has no candles at all.
    async fn earliest_real_candle(
        &self,
        details: &CandleDetails,
        direct: bool,
        base_token: &str,
        quote_token: &str,
    ) -> Result<Option<i64>, CandelaError> {
        let key = PairKey::new(base_token, quote_token);
        if let Some(ts) = self.end_times.get(&key).await {
            #[cfg(feature = "tracing")]
            tracing::debug!(pair = %key, earliest = ts, "end-time cache hit");
            return Ok(Some(ts));
        }

        let resolved = if direct {
            earliest_candle_timestamp(self.indexer.as_ref(), details, base_token, quote_token)
                .await?
        } else {
            self.earliest_custom_pair(details, base_token, quote_token)
                .await?
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(pair = %key, earliest = ?resolved, "end-time cache miss");

        match resolved {
            Some(ts) => Ok(Some(self.end_times.insert(key, ts).await)),
            None => Ok(None),
        }
    }
}
