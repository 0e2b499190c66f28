//! Duration severity buckets for the trace waterfall view
//!
//! Each span in a batch is classified by its duration relative to the
//! longest span, into one of five fixed buckets with stable display
//! colors.

use pulse_core::SpanItem;
use serde::Serialize;

/// Severity bucket for a span duration ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationBucket {
    Fast,
    Normal,
    Medium,
    Slow,
    VerySlow,
}

impl DurationBucket {
    /// Classify a duration ratio. Thresholds are exclusive lower bounds:
    /// a ratio of exactly 0.2 is still `Fast`.
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio > 0.8 {
            Self::VerySlow
        } else if ratio > 0.6 {
            Self::Slow
        } else if ratio > 0.4 {
            Self::Medium
        } else if ratio > 0.2 {
            Self::Normal
        } else {
            Self::Fast
        }
    }

    /// Bucket index, 0 (fastest) through 4 (slowest)
    pub fn index(&self) -> usize {
        match self {
            Self::Fast => 0,
            Self::Normal => 1,
            Self::Medium => 2,
            Self::Slow => 3,
            Self::VerySlow => 4,
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Fast => "Fast",
            Self::Normal => "Normal",
            Self::Medium => "Medium",
            Self::Slow => "Slow",
            Self::VerySlow => "Very Slow",
        }
    }

    /// Fixed display color, indexed by bucket
    pub fn color(&self) -> &'static str {
        const COLORS: [&str; 5] = ["#60a5fa", "#34d399", "#fbbf24", "#fb923c", "#f43f5e"];
        COLORS[self.index()]
    }
}

/// Ratio of a duration to the batch maximum, with the divisor floored at 1
/// so an all-zero batch still divides cleanly
pub fn duration_ratio(duration_ms: f64, max_duration_ms: f64) -> f64 {
    duration_ms / max_duration_ms.max(1.0)
}

/// Classify every span in a batch against the batch's longest span
pub fn bucket_spans(spans: &[SpanItem]) -> Vec<(&SpanItem, DurationBucket)> {
    let max = spans.iter().map(|s| s.duration_ms).fold(0.0, f64::max);
    spans
        .iter()
        .map(|span| {
            let bucket = DurationBucket::from_ratio(duration_ratio(span.duration_ms, max));
            (span, bucket)
        })
        .collect()
}
