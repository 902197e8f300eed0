//! Cache-aside coordinator for metric computations.
//!
//! [`CacheAside::memoize`] consults the backend first and returns a hit
//! as-is. On a miss it computes the value, attempts to store it, and returns
//! it. Backend failures on either side are logged at warn level and
//! otherwise ignored, so a degraded cache costs recomputation, never
//! correctness.

use std::sync::Arc;
use std::time::Duration;

use lexis_core::{ConfigError, LexisResult, Metric, MetricValue};

use super::key::MetricKey;
use super::traits::MetricCache;

/// Configuration for cache backends.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// How long a stored entry stays servable.
    pub entry_ttl: Duration,
    /// Maximum number of entries held at once.
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            entry_ttl: Duration::from_secs(300),
            max_entries: 10_000,
        }
    }
}

impl CacheConfig {
    /// Create a cache config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the entry TTL.
    pub fn with_entry_ttl(mut self, ttl: Duration) -> Self {
        self.entry_ttl = ttl;
        self
    }

    /// Set the max entry count.
    pub fn with_max_entries(mut self, max: usize) -> Self {
        self.max_entries = max;
        self
    }

    /// Reject values no backend can operate under.
    pub fn validate(&self) -> LexisResult<()> {
        if self.max_entries == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_entries".to_string(),
                value: "0".to_string(),
                reason: "cache must hold at least one entry".to_string(),
            }
            .into());
        }
        if self.entry_ttl.is_zero() {
            return Err(ConfigError::InvalidValue {
                field: "entry_ttl".to_string(),
                value: "0s".to_string(),
                reason: "entries would expire immediately".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

/// Cache-aside coordinator over a [`MetricCache`] backend.
///
/// Clones share the backend, so one coordinator per process is enough and
/// handing copies to collaborators is cheap.
pub struct CacheAside<C: MetricCache> {
    backend: Arc<C>,
}

impl<C: MetricCache> CacheAside<C> {
    /// Wrap a backend.
    pub fn new(backend: Arc<C>) -> Self {
        Self { backend }
    }

    /// Get a reference to the wrapped backend.
    pub fn backend(&self) -> &C {
        &self.backend
    }

    /// Return the value of `metric` over `content`, computing it on miss.
    ///
    /// A stored value of the right shape is a hit, `Count(0)` included. A
    /// read error, a timeout, or a stored value of the wrong shape all count
    /// as misses: `compute` runs and its result overwrites whatever the
    /// backend held. Write failures are logged and dropped; the caller still
    /// receives the computed value.
    pub async fn memoize<V, F>(&self, metric: Metric, content: &str, compute: F) -> V
    where
        V: Clone + Into<MetricValue> + TryFrom<MetricValue> + Send,
        F: FnOnce() -> V + Send,
    {
        let key = MetricKey::new(metric, content);

        match self.backend.get(&key).await {
            Ok(Some(cached)) => {
                if let Ok(value) = V::try_from(cached) {
                    return value;
                }
                // Wrong shape for this operation: fall through and overwrite.
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(
                    metric = metric.op_name(),
                    error = %e,
                    "Cache read failed, recomputing"
                );
            }
        }

        let value = compute();
        if let Err(e) = self.backend.set(&key, &value.clone().into()).await {
            tracing::warn!(
                metric = metric.op_name(),
                error = %e,
                "Cache write failed, result not cached"
            );
        }
        value
    }
}

impl<C: MetricCache> Clone for CacheAside<C> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
