use candela_core::{Bar, CandelaError, CandleDetails, CandleQuery, CandleRecord, IndexerClient};

/// Fetch candles of a pair with a native indexer feed.
///
/// Selects rows whose `periodStartUnix` lies in `[start, end]` (seconds),
/// newest first, at most `limit` of them, and validates each into a [`Bar`].
///
/// # Errors
/// Propagates transport errors from `client` and returns
/// `MalformedCandleRecord` for the first row that does not parse.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "candela::fetch::query_direct_pair",
        skip_all,
        fields(
            client = client.name(),
            entity = details.entity_name(),
            base = base_token,
            quote = quote_token,
            start = start,
            end = end,
        ),
    )
)]
pub async fn query_direct_pair(
    client: &dyn IndexerClient,
    details: &CandleDetails,
    base_token: &str,
    quote_token: &str,
    start: i64,
    end: i64,
    limit: u32,
) -> Result<Vec<Bar>, CandelaError> {
    let query = CandleQuery::range(details, base_token, quote_token, start, end, limit);
    let rows = client.candles(&query).await?;
    rows.iter().map(CandleRecord::to_bar).collect()
}

/// Period start (seconds) of the oldest candle the indexer holds for a pair.
///
/// Returns `Ok(None)` when the pair has no candles at this duration.
///
/// # Errors
/// Propagates transport errors and rejects a malformed `periodStartUnix`.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "candela::fetch::earliest_candle_timestamp",
        skip_all,
        fields(client = client.name(), base = base_token, quote = quote_token),
    )
)]
pub async fn earliest_candle_timestamp(
    client: &dyn IndexerClient,
    details: &CandleDetails,
    base_token: &str,
    quote_token: &str,
) -> Result<Option<i64>, CandelaError> {
    let query = CandleQuery::earliest(details, base_token, quote_token);
    let rows = client.candles(&query).await?;
    rows.first().map(CandleRecord::period_start).transpose()
}
