//! Backend trait and statistics for the metric cache.

use async_trait::async_trait;
use lexis_core::{LexisResult, MetricValue};

use super::key::MetricKey;

/// Storage backend for memoized metric results.
///
/// Backends may drop entries at any time: TTL expiry, capacity eviction, or
/// a restart. `get` returning `Ok(None)` is a plain miss. Errors are
/// reported so the coordinator can log them, but no caller depends on a
/// backend working.
#[async_trait]
pub trait MetricCache: Send + Sync {
    /// Look up a previously stored value.
    async fn get(&self, key: &MetricKey) -> LexisResult<Option<MetricValue>>;

    /// Store a computed value under its key, replacing any existing entry.
    async fn set(&self, key: &MetricKey, value: &MetricValue) -> LexisResult<()>;

    /// Counters accumulated since the backend was created.
    async fn stats(&self) -> LexisResult<CacheStats>;
}

/// Cache statistics for observability.
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    /// Number of lookups answered from the cache.
    pub hits: u64,
    /// Number of lookups that found nothing usable.
    pub misses: u64,
    /// Number of entries currently held.
    pub entry_count: u64,
    /// Number of entries dropped to stay under capacity.
    pub evictions: u64,
}

impl CacheStats {
    /// Hit rate in `[0.0, 1.0]`. Zero before the first lookup.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
