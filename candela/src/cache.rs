use candela_core::PairKey;
use moka::future::Cache;

/// Earliest known real-candle timestamp (seconds) per token pair.
///
/// One instance is meant to live for a whole session and be shared between
/// series builders; clones share the same storage. Entries are written once
/// and never evicted: the first value stored for a pair wins.
#[derive(Clone, Debug)]
pub struct EndTimeCache {
    inner: Cache<PairKey, i64>,
}

impl Default for EndTimeCache {
    fn default() -> Self {
        Self::new()
    }
}

impl EndTimeCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Cache::builder().build(),
        }
    }

    /// Cached timestamp for `key`, if any.
    pub async fn get(&self, key: &PairKey) -> Option<i64> {
        self.inner.get(key).await
    }

    /// Store `timestamp` for `key` unless a value is already present.
    ///
    /// Returns the value the cache holds afterwards.
    pub async fn insert(&self, key: PairKey, timestamp: i64) -> i64 {
        self.inner.entry(key).or_insert(timestamp).await.into_value()
    }

    /// Number of cached pairs.
    pub async fn len(&self) -> u64 {
        self.inner.run_pending_tasks().await;
        self.inner.entry_count()
    }

    /// True when nothing has been cached yet.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
