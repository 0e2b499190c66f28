//! Request and response types for the Pulse client
//!
//! Deserialization is lenient (`#[serde(default)]` on optional fields) so
//! the client tolerates additive server changes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Services
// =============================================================================

/// Service information returned by the server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub name: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub href: Option<String>,
    /// Returned by the detail endpoint only
    #[serde(default)]
    pub capabilities: Option<ServiceCapabilities>,
}

/// Service capabilities
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceCapabilities {
    #[serde(default)]
    pub logs: bool,
    #[serde(default)]
    pub log_ingest: bool,
    #[serde(default)]
    pub log_stream: bool,
    #[serde(default)]
    pub traces: bool,
    #[serde(default)]
    pub metrics: bool,
    #[serde(default)]
    pub slos: bool,
    #[serde(default)]
    pub slo_write: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServicesResponse {
    pub items: Vec<Service>,
    pub total_count: usize,
}

// =============================================================================
// Logs
// =============================================================================

/// A log entry as returned by the server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogItem {
    pub id: String,
    pub service: String,
    pub timestamp: DateTime<Utc>,
    pub level: String,
    pub message: String,
    #[serde(default)]
    pub trace_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogsResponse {
    pub items: Vec<LogItem>,
    pub total_count: usize,
}

/// Query parameters for log requests
#[derive(Debug, Clone, Default, Serialize)]
pub struct LogQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tail: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
}

/// Body for log ingestion
#[derive(Debug, Clone, Serialize)]
pub struct IngestLog {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
}

/// A template group of log entries
#[derive(Debug, Clone, Deserialize)]
pub struct LogGroupItem {
    pub key: String,
    pub title: String,
    pub count: usize,
    pub items: Vec<LogItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogGroupsResponse {
    pub groups: Vec<LogGroupItem>,
    pub total_entries: usize,
}

// =============================================================================
// Traces
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct TraceSummaryItem {
    pub trace_id: String,
    pub service: String,
    pub root_span: String,
    pub started_at: DateTime<Utc>,
    pub duration_ms: f64,
    pub span_count: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TracesResponse {
    pub items: Vec<TraceSummaryItem>,
    pub total_count: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpanBar {
    pub span_id: String,
    pub name: String,
    pub timestamp: DateTime<Utc>,
    pub duration_ms: f64,
    pub ratio: f64,
    pub bucket: String,
    pub color: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WaterfallResponse {
    pub trace_id: String,
    pub max_duration_ms: f64,
    pub items: Vec<SpanBar>,
}

// =============================================================================
// Metrics
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct MetricPointItem {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricSeriesResponse {
    pub metric: String,
    pub service: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub interval: String,
    pub points: Vec<MetricPointItem>,
}

// =============================================================================
// SLOs
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SloItem {
    pub id: String,
    pub name: String,
    pub metric: String,
    pub target: f64,
    pub sli_value: f64,
    pub total_minutes: f64,
    pub actual_downtime_minutes: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SlosResponse {
    pub items: Vec<SloItem>,
    pub total_count: usize,
}

/// Body for SLO create/update
#[derive(Debug, Clone, Serialize)]
pub struct SloPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub metric: String,
    pub target: f64,
    pub sli_value: f64,
    pub total_minutes: f64,
    pub actual_downtime_minutes: f64,
}

/// Computed SLO status for a range
#[derive(Debug, Clone, Deserialize)]
pub struct SloStatusResponse {
    pub slo: SloItem,
    pub range: String,
    pub status: String,
    pub adjusted_sli: f64,
    pub allowed_downtime_minutes: f64,
    pub error_budget_used_rate: f64,
    pub error_budget_remaining_pct: f64,
    pub error_budget_over_pct: f64,
}

// =============================================================================
// Notifications
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Channel {
    pub id: String,
    pub name: String,
    pub kind: String,
    pub endpoint: String,
    pub enabled: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChannelsResponse {
    pub items: Vec<Channel>,
    pub total_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rule {
    pub id: String,
    pub name: String,
    pub channel_id: String,
    pub trigger: String,
    #[serde(default)]
    pub threshold: Option<f64>,
    pub enabled: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RulesResponse {
    pub items: Vec<Rule>,
    pub total_count: usize,
}

/// Error body emitted by the server
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: String,
    #[serde(default)]
    pub message: String,
}
