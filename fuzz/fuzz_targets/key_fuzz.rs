//! Fuzz test for metric cache key construction
//!
//! This fuzz target builds content-addressed keys from arbitrary bytes to
//! find:
//! - Panics or crashes
//! - Collisions between distinct operations
//! - Non-deterministic renderings
//!
//! Run with: cargo +nightly fuzz run key_fuzz -- -max_total_time=60

#![no_main]

use lexis_core::Metric;
use lexis_storage::MetricKey;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    // The first byte selects the metric, the rest is document content
    let metric = Metric::ALL[data[0] as usize % Metric::ALL.len()];
    if let Ok(content) = std::str::from_utf8(&data[1..]) {
        let key = MetricKey::new(metric, content);

        // Construction is deterministic
        assert_eq!(key, MetricKey::new(metric, content));

        // The rendering leads with the operation name and ends with the
        // content, byte for byte
        assert!(key.as_str().starts_with(metric.op_name()));
        assert!(key.as_str().ends_with(content));

        // Distinct operations never collide on the same content
        for other in Metric::ALL {
            if other != metric {
                assert_ne!(key, MetricKey::new(other, content));
            }
        }
    }
});
