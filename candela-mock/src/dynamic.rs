use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use candela_core::{Bar, CandelaError, CandleQuery, CandleRecord, IndexerClient};

use crate::serve;

/// Instruction for how queries for a given pair should behave.
#[derive(Clone, Debug)]
pub enum MockBehavior {
    /// Answer from the loaded series (the default).
    Serve,
    /// Return these records verbatim, ignoring the query filters.
    Rows(Vec<CandleRecord>),
    /// Fail immediately with the provided error.
    Fail(CandelaError),
    /// Answer from the loaded series after a delay.
    Delay(Duration),
    /// Hang indefinitely (simulate a stalled indexer).
    Hang,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct SeriesKey {
    entity: String,
    base: String,
    quote: String,
}

impl SeriesKey {
    fn new(entity: &str, base: &str, quote: &str) -> Self {
        Self {
            entity: entity.to_string(),
            base: base.to_ascii_lowercase(),
            quote: quote.to_ascii_lowercase(),
        }
    }
}

#[derive(Default)]
struct InternalState {
    series: HashMap<SeriesKey, Vec<Bar>>,
    rules: HashMap<(String, String), MockBehavior>,
    queries: Vec<CandleQuery>,
}

/// Controller handle used by tests to drive the dynamic indexer from the outside.
#[derive(Clone)]
pub struct IndexerController {
    state: Arc<Mutex<InternalState>>,
}

impl IndexerController {
    /// Load the candles served for `(entity, base, quote)`, replacing earlier ones.
    pub async fn set_series(&self, entity: &str, base: &str, quote: &str, bars: Vec<Bar>) {
        let mut guard = self.state.lock().await;
        guard.series.insert(SeriesKey::new(entity, base, quote), bars);
    }

    /// Set the behavior for every query on the `base`/`quote` pair.
    pub async fn set_behavior(&self, base: &str, quote: &str, behavior: MockBehavior) {
        let mut guard = self.state.lock().await;
        guard.rules.insert(
            (base.to_ascii_lowercase(), quote.to_ascii_lowercase()),
            behavior,
        );
    }

    /// Return a copy of every query received so far, in arrival order.
    pub async fn queries(&self) -> Vec<CandleQuery> {
        self.state.lock().await.queries.clone()
    }

    /// Number of queries received so far.
    pub async fn query_count(&self) -> usize {
        self.state.lock().await.queries.len()
    }

    /// Clear all series, behaviors and the query log.
    pub async fn clear_all(&self) {
        let mut guard = self.state.lock().await;
        guard.series.clear();
        guard.rules.clear();
        guard.queries.clear();
    }
}

/// An indexer that defers all behavior to an external controller.
pub struct DynamicIndexer {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
}

impl DynamicIndexer {
    /// Create a new dynamic indexer and its controller.
    #[must_use]
    pub fn new_with_controller(name: &'static str) -> (Arc<dyn IndexerClient>, IndexerController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = IndexerController {
            state: Arc::clone(&state),
        };
        let me = Arc::new(Self { name, state });
        (me as Arc<dyn IndexerClient>, controller)
    }
}

#[async_trait]
impl IndexerClient for DynamicIndexer {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn candles(&self, query: &CandleQuery) -> Result<Vec<CandleRecord>, CandelaError> {
        // Snapshot what we need without holding the lock across await points
        let (behavior, bars) = {
            let mut guard = self.state.lock().await;
            guard.queries.push(query.clone());
            let behavior = guard
                .rules
                .get(&(
                    query.base_token.to_ascii_lowercase(),
                    query.quote_token.to_ascii_lowercase(),
                ))
                .cloned()
                .unwrap_or(MockBehavior::Serve);
            let bars = guard
                .series
                .get(&SeriesKey::new(&query.entity, &query.base_token, &query.quote_token))
                .cloned()
                .unwrap_or_default();
            (behavior, bars)
        };

        match behavior {
            MockBehavior::Serve => Ok(serve(query, &bars)),
            MockBehavior::Rows(rows) => Ok(rows),
            MockBehavior::Fail(e) => Err(e),
            MockBehavior::Delay(d) => {
                tokio::time::sleep(d).await;
                Ok(serve(query, &bars))
            }
            MockBehavior::Hang => {
                std::future::pending::<()>().await;
                Ok(Vec::new())
            }
        }
    }
}
