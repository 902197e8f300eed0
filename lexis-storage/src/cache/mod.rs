//! Metric result cache with a cache-aside coordinator.
//!
//! Metric computations are pure functions of document content, so results are
//! memoized under content-addressed keys: when the content changes the key
//! changes with it, and stale entries simply stop being looked up. There is
//! no explicit invalidation path.
//!
//! The [`CacheAside`] coordinator treats every backend failure as a miss.
//! A broken cache costs recomputation, never correctness, and callers never
//! see a cache error.

pub mod cache_aside;
pub mod key;
pub mod memory_backend;
pub mod traits;

pub use cache_aside::{CacheAside, CacheConfig};
pub use key::MetricKey;
pub use memory_backend::MemoryCacheBackend;
pub use traits::{CacheStats, MetricCache};
