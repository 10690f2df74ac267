//! Metric kinds.

use std::fmt;

/// The kind of an exported metric.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum MetricKind {
    /// Monotonically increasing value.
    Counter,
    /// Value that can be set arbitrarily.
    Gauge,
    /// Gauge holding a duration.
    Timer,
    /// Last-seen string value.
    Text,
    /// Distribution over fixed buckets.
    Histogram,
}

impl MetricKind {
    /// All kinds, in declaration-keyword order.
    pub const ALL: [MetricKind; 5] = [
        MetricKind::Counter,
        MetricKind::Gauge,
        MetricKind::Timer,
        MetricKind::Text,
        MetricKind::Histogram,
    ];

    /// The keyword that declares this kind in source.
    pub const fn as_str(self) -> &'static str {
        match self {
            MetricKind::Counter => "counter",
            MetricKind::Gauge => "gauge",
            MetricKind::Timer => "timer",
            MetricKind::Text => "text",
            MetricKind::Histogram => "histogram",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
