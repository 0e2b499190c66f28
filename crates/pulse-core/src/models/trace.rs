//! Distributed trace models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single timed unit of work within a trace
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpanItem {
    /// Unique span identifier
    pub span_id: String,
    /// Operation name (e.g., "SELECT orders", "GET /cart")
    pub name: String,
    /// When the span started
    pub timestamp: DateTime<Utc>,
    /// Span duration in milliseconds, never negative
    pub duration_ms: f64,
}

/// A complete trace with its spans
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trace {
    /// Unique trace identifier
    pub trace_id: String,
    /// Service that owns the root span
    pub service: String,
    /// Name of the root span
    pub root_span: String,
    /// When the trace started
    pub started_at: DateTime<Utc>,
    /// Total trace duration in milliseconds
    pub duration_ms: f64,
    /// All spans in the trace
    pub spans: Vec<SpanItem>,
}

impl Trace {
    /// Listing shape without the span payload
    pub fn summary(&self) -> TraceSummary {
        TraceSummary {
            trace_id: self.trace_id.clone(),
            service: self.service.clone(),
            root_span: self.root_span.clone(),
            started_at: self.started_at,
            duration_ms: self.duration_ms,
            span_count: self.spans.len(),
        }
    }
}

/// Trace listing entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceSummary {
    pub trace_id: String,
    pub service: String,
    pub root_span: String,
    pub started_at: DateTime<Utc>,
    pub duration_ms: f64,
    pub span_count: usize,
}

/// Filter for listing traces
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TraceFilter {
    /// Traces started since this time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<DateTime<Utc>>,
    /// Traces started until this time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub until: Option<DateTime<Utc>>,
    /// Only traces at least this long
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_duration_ms: Option<f64>,
    /// Maximum number of traces to return
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl TraceFilter {
    /// True if the trace passes every set criterion (limit excluded)
    pub fn matches(&self, trace: &Trace) -> bool {
        if let Some(since) = self.since {
            if trace.started_at < since {
                return false;
            }
        }
        if let Some(until) = self.until {
            if trace.started_at > until {
                return false;
            }
        }
        if let Some(min) = self.min_duration_ms {
            if trace.duration_ms < min {
                return false;
            }
        }
        true
    }
}
