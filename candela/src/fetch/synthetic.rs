use candela_core::{Bar, CandelaError, CandleDetails, compose_cross_rate};

use crate::CandleSeries;
use crate::fetch::direct::{earliest_candle_timestamp, query_direct_pair};

impl CandleSeries {
    /// Token address of the configured reference asset.
    pub(crate) fn reference_token(&self) -> Result<String, CandelaError> {
        self.resolver.token_address(&self.cfg.reference_asset)
    }

    /// Fetch a pair without a native feed by composing `base/REF` over `quote/REF`.
    ///
    /// Both legs are fetched concurrently; the first failure wins.
    ///
    /// # Errors
    /// Fails if the reference asset cannot be resolved or either leg fails.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "candela::fetch::query_custom_pairs",
            skip_all,
            fields(base = base_token, quote = quote_token, start = start, end = end),
        )
    )]
    pub async fn query_custom_pairs(
        &self,
        details: &CandleDetails,
        base_token: &str,
        quote_token: &str,
        start: i64,
        end: i64,
    ) -> Result<Vec<Bar>, CandelaError> {
        let reference = self.reference_token()?;
        let limit = self.row_limit(details, start, end);
        let indexer = self.indexer.as_ref();
        let (base, quote) = futures::try_join!(
            query_direct_pair(indexer, details, base_token, &reference, start, end, limit),
            query_direct_pair(indexer, details, quote_token, &reference, start, end, limit),
        )?;
        Ok(compose_cross_rate(base, quote))
    }

    /// Earliest candle of a synthetic pair: the older of its two reference legs.
    pub(crate) async fn earliest_custom_pair(
        &self,
        details: &CandleDetails,
        base_token: &str,
        quote_token: &str,
    ) -> Result<Option<i64>, CandelaError> {
        let reference = self.reference_token()?;
        let indexer = self.indexer.as_ref();
        let (base, quote) = futures::try_join!(
            earliest_candle_timestamp(indexer, details, base_token, &reference),
            earliest_candle_timestamp(indexer, details, quote_token, &reference),
        )?;
        Ok(base.into_iter().chain(quote).min())
    }
}
