//! In-memory cache backend with TTL expiry and capacity eviction.

use std::collections::HashMap;
use std::time::Instant;

use async_trait::async_trait;
use lexis_core::{CacheError, LexisResult, MetricValue};
use tokio::sync::RwLock;

use super::cache_aside::CacheConfig;
use super::key::MetricKey;
use super::traits::{CacheStats, MetricCache};

/// A serialized value plus the instant it was written.
#[derive(Debug, Clone)]
struct CacheEntry {
    payload: Vec<u8>,
    stored_at: Instant,
}

/// In-memory backend storing metric values as serialized JSON.
///
/// Entries older than `entry_ttl` are dropped lazily on lookup. When an
/// insert of a new key would exceed `max_entries`, the oldest entry is
/// evicted first. Values go through serialization so that a stored entry
/// behaves exactly like one persisted by an external backend.
#[derive(Debug, Default)]
pub struct MemoryCacheBackend {
    entries: RwLock<HashMap<String, CacheEntry>>,
    stats: RwLock<CacheStats>,
    config: CacheConfig,
}

impl MemoryCacheBackend {
    /// Create a backend with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend with an explicit configuration.
    pub fn with_config(config: CacheConfig) -> LexisResult<Self> {
        config.validate()?;
        Ok(Self {
            entries: RwLock::new(HashMap::new()),
            stats: RwLock::new(CacheStats::default()),
            config,
        })
    }

    /// The configuration this backend runs under.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }
}

#[async_trait]
impl MetricCache for MemoryCacheBackend {
    async fn get(&self, key: &MetricKey) -> LexisResult<Option<MetricValue>> {
        let mut entries = self.entries.write().await;
        let payload = match entries.get(key.as_str()) {
            Some(entry) if entry.stored_at.elapsed() < self.config.entry_ttl => {
                Some(entry.payload.clone())
            }
            Some(_) => {
                // Expired. Drop it now so it stops counting toward capacity.
                entries.remove(key.as_str());
                None
            }
            None => None,
        };
        drop(entries);

        match payload {
            Some(bytes) => {
                let value: MetricValue =
                    serde_json::from_slice(&bytes).map_err(|e| CacheError::ReadFailed {
                        reason: e.to_string(),
                    })?;
                let mut stats = self.stats.write().await;
                stats.hits += 1;
                Ok(Some(value))
            }
            None => {
                let mut stats = self.stats.write().await;
                stats.misses += 1;
                Ok(None)
            }
        }
    }

    async fn set(&self, key: &MetricKey, value: &MetricValue) -> LexisResult<()> {
        let payload = serde_json::to_vec(value).map_err(|e| CacheError::WriteFailed {
            reason: e.to_string(),
        })?;

        let mut entries = self.entries.write().await;
        let mut evicted = 0u64;
        if !entries.contains_key(key.as_str()) {
            while entries.len() >= self.config.max_entries {
                let oldest = entries
                    .iter()
                    .min_by_key(|(_, entry)| entry.stored_at)
                    .map(|(k, _)| k.clone());
                match oldest {
                    Some(k) => {
                        entries.remove(&k);
                        evicted += 1;
                    }
                    None => break,
                }
            }
        }
        entries.insert(
            key.as_str().to_string(),
            CacheEntry {
                payload,
                stored_at: Instant::now(),
            },
        );
        drop(entries);

        if evicted > 0 {
            let mut stats = self.stats.write().await;
            stats.evictions += evicted;
        }
        Ok(())
    }

    async fn stats(&self) -> LexisResult<CacheStats> {
        let entry_count = self.entries.read().await.len() as u64;
        let mut stats = self.stats.read().await.clone();
        stats.entry_count = entry_count;
        Ok(stats)
    }
}

// ============================================================================
// TESTS
// ============================================================================
