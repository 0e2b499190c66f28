//! TelemetryBackend trait - the core abstraction for telemetry sources
//!
//! A backend serves one monitored service. The API layer is generic over
//! this trait, so stores fed by different pipelines (in-memory demo,
//! database, remote collector) plug in without handler changes.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::broadcast;

use crate::error::BackendResult;
use crate::models::{
    Capabilities, LogEntry, LogFilter, MetricKind, MetricSeries, ServiceInfo, SloRecord, Trace,
    TraceFilter, TraceSummary,
};

/// A telemetry source for one monitored service
#[async_trait]
pub trait TelemetryBackend: Send + Sync {
    /// Service this backend reports for
    fn service_info(&self) -> &ServiceInfo;

    /// What this backend supports
    fn capabilities(&self) -> &Capabilities;

    // =========================================================================
    // Logs
    // =========================================================================

    /// Query stored log entries, oldest first
    async fn query_logs(&self, filter: &LogFilter) -> BackendResult<Vec<LogEntry>>;

    /// Ingest a log entry (default: not supported)
    async fn ingest_log(&self, entry: LogEntry) -> BackendResult<LogEntry> {
        let _ = entry;
        Err(crate::error::BackendError::NotSupported(
            "ingest_log".to_string(),
        ))
    }

    /// Subscribe to the live log feed (default: not supported)
    async fn stream_logs(&self) -> BackendResult<broadcast::Receiver<LogEntry>> {
        Err(crate::error::BackendError::NotSupported(
            "stream_logs".to_string(),
        ))
    }

    // =========================================================================
    // Traces
    // =========================================================================

    /// List trace summaries, most recent first
    async fn list_traces(&self, filter: &TraceFilter) -> BackendResult<Vec<TraceSummary>>;

    /// Fetch a full trace with its spans
    async fn get_trace(&self, trace_id: &str) -> BackendResult<Trace>;

    // =========================================================================
    // Metrics
    // =========================================================================

    /// Sample a metric series over [start, end] at the given interval.
    ///
    /// `interval` is a display string like "5m"; backends sample at that
    /// granularity but it carries no correctness weight.
    async fn query_metrics(
        &self,
        metric: MetricKind,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        interval: &str,
    ) -> BackendResult<MetricSeries>;

    // =========================================================================
    // SLOs
    // =========================================================================

    /// List SLO definitions for this service
    async fn list_slos(&self) -> BackendResult<Vec<SloRecord>>;

    /// Fetch a single SLO definition
    async fn get_slo(&self, slo_id: &str) -> BackendResult<SloRecord>;

    /// Create an SLO definition (default: not supported)
    async fn create_slo(&self, slo: SloRecord) -> BackendResult<SloRecord> {
        let _ = slo;
        Err(crate::error::BackendError::NotSupported(
            "create_slo".to_string(),
        ))
    }

    /// Replace an SLO definition (default: not supported)
    async fn update_slo(&self, slo: SloRecord) -> BackendResult<SloRecord> {
        let _ = slo;
        Err(crate::error::BackendError::NotSupported(
            "update_slo".to_string(),
        ))
    }

    /// Delete an SLO definition (default: not supported)
    async fn delete_slo(&self, slo_id: &str) -> BackendResult<()> {
        let _ = slo_id;
        Err(crate::error::BackendError::NotSupported(
            "delete_slo".to_string(),
        ))
    }
}
