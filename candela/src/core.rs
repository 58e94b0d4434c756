use std::sync::Arc;
use std::time::Duration;

use candela_core::{CandelaConfig, CandelaError, Clock, IndexerClient, SystemClock, TokenResolver};

use crate::cache::EndTimeCache;

/// Builds contiguous candle series for token pairs from an indexer.
pub struct CandleSeries {
    pub(crate) indexer: Arc<dyn IndexerClient>,
    pub(crate) resolver: Arc<dyn TokenResolver>,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) end_times: EndTimeCache,
    pub(crate) cfg: CandelaConfig,
}

/// Builder for [`CandleSeries`].
pub struct CandleSeriesBuilder {
    indexer: Option<Arc<dyn IndexerClient>>,
    resolver: Option<Arc<dyn TokenResolver>>,
    clock: Arc<dyn Clock>,
    end_times: Option<EndTimeCache>,
    cfg: CandelaConfig,
}

impl Default for CandleSeriesBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CandleSeriesBuilder {
    /// Create a builder with default configuration and the system clock.
    ///
    /// An indexer and a token resolver must be supplied before [`build`](Self::build).
    #[must_use]
    pub fn new() -> Self {
        Self {
            indexer: None,
            resolver: None,
            clock: Arc::new(SystemClock),
            end_times: None,
            cfg: CandelaConfig::default(),
        }
    }

    /// Set the indexer client every candle query goes through.
    #[must_use]
    pub fn indexer(mut self, indexer: Arc<dyn IndexerClient>) -> Self {
        self.indexer = Some(indexer);
        self
    }

    /// Set the asset → token address resolver.
    #[must_use]
    pub fn token_resolver(mut self, resolver: Arc<dyn TokenResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Replace the wall clock used to keep backfilled bars out of the future.
    #[must_use]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Share an existing earliest-candle cache.
    ///
    /// Without one, the series gets a private cache that lives as long as it does.
    #[must_use]
    pub fn end_time_cache(mut self, cache: EndTimeCache) -> Self {
        self.end_times = Some(cache);
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: CandelaConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Maximum number of candles covered by one indexer query.
    #[must_use]
    pub const fn chunk_size(mut self, size: u32) -> Self {
        self.cfg.chunk_size = size;
        self
    }

    /// Row cap sent with every indexer query.
    #[must_use]
    pub const fn candle_limit(mut self, limit: u32) -> Self {
        self.cfg.candle_limit = limit;
        self
    }

    /// Asset used to compose pairs that have no native feed.
    #[must_use]
    pub fn reference_asset(mut self, asset: impl Into<String>) -> Self {
        self.cfg.reference_asset = asset.into();
        self
    }

    /// Quote assets the indexer serves natively.
    #[must_use]
    pub fn direct_quote_assets<I, S>(mut self, assets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cfg.direct_quote_assets = assets.into_iter().map(Into::into).collect();
        self
    }

    /// Bound the total duration of a `query_candles` call.
    ///
    /// When exceeded the call fails with a wrapped `RequestTimeout`. In-flight
    /// indexer queries are dropped, not cancelled upstream.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.request_timeout = Some(timeout);
        self
    }

    /// Build the series.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the indexer or the token resolver is missing, or
    /// if the configuration does not validate.
    pub fn build(self) -> Result<CandleSeries, CandelaError> {
        let indexer = self.indexer.ok_or_else(|| {
            CandelaError::InvalidArg("no indexer configured; add one via indexer(...)".to_string())
        })?;
        let resolver = self.resolver.ok_or_else(|| {
            CandelaError::InvalidArg(
                "no token resolver configured; add one via token_resolver(...)".to_string(),
            )
        })?;
        self.cfg.validate()?;

        Ok(CandleSeries {
            indexer,
            resolver,
            clock: self.clock,
            end_times: self.end_times.unwrap_or_default(),
            cfg: self.cfg,
        })
    }
}

impl CandleSeries {
    /// Start building a new `CandleSeries`.
    #[must_use]
    pub fn builder() -> CandleSeriesBuilder {
        CandleSeriesBuilder::new()
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &CandelaConfig {
        &self.cfg
    }

    /// The earliest-candle cache this series reads and fills.
    #[must_use]
    pub const fn end_time_cache(&self) -> &EndTimeCache {
        &self.end_times
    }

    /// Run `fut` under the configured request deadline, if any.
    pub(crate) async fn with_request_deadline<T, Fut>(
        deadline: Option<Duration>,
        capability: &'static str,
        fut: Fut,
    ) -> Result<T, CandelaError>
    where
        Fut: std::future::Future<Output = Result<T, CandelaError>>,
    {
        match deadline {
            Some(d) => tokio::time::timeout(d, fut)
                .await
                .unwrap_or_else(|_| Err(CandelaError::request_timeout(capability))),
            None => fut.await,
        }
    }
}
