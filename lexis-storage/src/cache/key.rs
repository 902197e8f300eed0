//! Content-addressed keys for memoized metric results.
//!
//! A key binds the operation name and any parameters to the exact content the
//! result was computed from. Equal keys therefore mean equal inputs, and a
//! hit can be returned without re-reading the document.

use std::fmt;

use lexis_core::Metric;

/// Separator between the operation, parameter, and content segments.
const SEPARATOR: char = ':';

/// Cache key for a single metric computation.
///
/// Rendered as `op_name[:params]:content`; the parameter segment appears only
/// for operations that take one. Content may itself contain the separator, so
/// keys are write-only: they are compared and hashed, never parsed back into
/// their segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MetricKey {
    inner: String,
}

impl MetricKey {
    /// Build the key for computing `metric` over `content`.
    pub fn new(metric: Metric, content: &str) -> Self {
        let mut inner = String::with_capacity(content.len() + 24);
        inner.push_str(metric.op_name());
        if let Some(params) = metric.param_segment() {
            inner.push(SEPARATOR);
            inner.push_str(&params);
        }
        inner.push(SEPARATOR);
        inner.push_str(content);
        Self { inner }
    }

    /// The rendered key.
    pub fn as_str(&self) -> &str {
        &self.inner
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner)
    }
}

// ============================================================================
// TESTS
// ============================================================================
