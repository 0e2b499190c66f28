//! In-memory telemetry store
//!
//! A `TelemetryBackend` holding logs, traces, and SLO definitions in
//! memory behind parking_lot locks. Logs live in a capacity-bounded ring
//! buffer; metric series are synthesized deterministically so that charts
//! render without a time-series database behind them.

use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use pulse_core::{
    BackendError, BackendResult, Capabilities, LogEntry, LogFilter, MetricKind, MetricPoint,
    MetricSeries, ServiceInfo, SloRecord, TelemetryBackend, Trace, TraceFilter, TraceSummary,
};
use tokio::sync::broadcast;
use tracing::debug;

use crate::config::StoreConfig;
use crate::live::LiveFeed;

/// In-memory telemetry store for one service
pub struct MemoryBackend {
    info: ServiceInfo,
    capabilities: Capabilities,
    capacity: usize,
    logs: RwLock<VecDeque<LogEntry>>,
    traces: RwLock<Vec<Trace>>,
    slos: RwLock<HashMap<String, SloRecord>>,
    feed: LiveFeed,
    /// Per-service offset so synthesized metrics differ between services
    metric_seed: u64,
}

impl MemoryBackend {
    pub fn new(config: &StoreConfig) -> Self {
        let info = ServiceInfo {
            id: config.id.clone(),
            name: config.name.clone(),
            kind: config.kind.clone(),
            description: config.description.clone(),
            href: format!("/apm/v1/services/{}", config.id),
            status: Some("healthy".to_string()),
        };
        debug!(service = %config.id, capacity = config.capacity, "creating memory backend");
        Self {
            info,
            capabilities: Capabilities::full(),
            capacity: config.capacity.max(1),
            logs: RwLock::new(VecDeque::new()),
            traces: RwLock::new(Vec::new()),
            slos: RwLock::new(HashMap::new()),
            feed: LiveFeed::new(),
            metric_seed: fnv1a(config.id.as_bytes()),
        }
    }

    /// Append a log entry directly (seeding and ingestion path)
    pub fn push_log(&self, entry: LogEntry) {
        let mut logs = self.logs.write();
        if logs.len() == self.capacity {
            logs.pop_front();
        }
        logs.push_back(entry.clone());
        drop(logs);
        self.feed.publish(&entry);
    }

    /// Store a trace directly (seeding path)
    pub fn push_trace(&self, trace: Trace) {
        self.traces.write().push(trace);
    }

    /// Store an SLO definition directly, replacing any existing one
    pub fn put_slo(&self, slo: SloRecord) {
        self.slos.write().insert(slo.id.clone(), slo);
    }

    /// Number of stored log entries
    pub fn log_count(&self) -> usize {
        self.logs.read().len()
    }
}

#[async_trait]
impl TelemetryBackend for MemoryBackend {
    fn service_info(&self) -> &ServiceInfo {
        &self.info
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    async fn query_logs(&self, filter: &LogFilter) -> BackendResult<Vec<LogEntry>> {
        let logs = self.logs.read();
        let mut matched: Vec<LogEntry> = logs.iter().filter(|e| filter.matches(e)).cloned().collect();

        if let Some(tail) = filter.tail {
            if matched.len() > tail {
                matched.drain(..matched.len() - tail);
            }
        }
        if let Some(limit) = filter.limit {
            matched.truncate(limit);
        }
        Ok(matched)
    }

    async fn ingest_log(&self, entry: LogEntry) -> BackendResult<LogEntry> {
        self.push_log(entry.clone());
        Ok(entry)
    }

    async fn stream_logs(&self) -> BackendResult<broadcast::Receiver<LogEntry>> {
        Ok(self.feed.subscribe())
    }

    async fn list_traces(&self, filter: &TraceFilter) -> BackendResult<Vec<TraceSummary>> {
        let traces = self.traces.read();
        let mut summaries: Vec<TraceSummary> = traces
            .iter()
            .filter(|t| filter.matches(t))
            .map(Trace::summary)
            .collect();
        summaries.sort_by(|a, b| b.started_at.cmp(&a.started_at));
        if let Some(limit) = filter.limit {
            summaries.truncate(limit);
        }
        Ok(summaries)
    }

    async fn get_trace(&self, trace_id: &str) -> BackendResult<Trace> {
        self.traces
            .read()
            .iter()
            .find(|t| t.trace_id == trace_id)
            .cloned()
            .ok_or_else(|| BackendError::TraceNotFound(trace_id.to_string()))
    }

    async fn query_metrics(
        &self,
        metric: MetricKind,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        interval: &str,
    ) -> BackendResult<MetricSeries> {
        let step = parse_interval(interval)
            .ok_or_else(|| BackendError::InvalidRequest(format!("Bad interval: {interval}")))?;
        if end < start {
            return Err(BackendError::InvalidRequest(
                "Metric window end precedes start".to_string(),
            ));
        }

        let mut points = Vec::new();
        let mut t = start;
        while t <= end {
            points.push(MetricPoint {
                timestamp: t,
                value: synthesize(metric, self.metric_seed, t),
            });
            t += step;
        }
        Ok(MetricSeries {
            metric,
            service: self.info.id.clone(),
            interval: interval.to_string(),
            points,
        })
    }

    async fn list_slos(&self) -> BackendResult<Vec<SloRecord>> {
        let mut slos: Vec<SloRecord> = self.slos.read().values().cloned().collect();
        slos.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(slos)
    }

    async fn get_slo(&self, slo_id: &str) -> BackendResult<SloRecord> {
        self.slos
            .read()
            .get(slo_id)
            .cloned()
            .ok_or_else(|| BackendError::SloNotFound(slo_id.to_string()))
    }

    async fn create_slo(&self, slo: SloRecord) -> BackendResult<SloRecord> {
        let mut slos = self.slos.write();
        if slos.contains_key(&slo.id) {
            return Err(BackendError::SloExists(slo.id));
        }
        slos.insert(slo.id.clone(), slo.clone());
        Ok(slo)
    }

    async fn update_slo(&self, slo: SloRecord) -> BackendResult<SloRecord> {
        let mut slos = self.slos.write();
        if !slos.contains_key(&slo.id) {
            return Err(BackendError::SloNotFound(slo.id));
        }
        slos.insert(slo.id.clone(), slo.clone());
        Ok(slo)
    }

    async fn delete_slo(&self, slo_id: &str) -> BackendResult<()> {
        self.slos
            .write()
            .remove(slo_id)
            .map(|_| ())
            .ok_or_else(|| BackendError::SloNotFound(slo_id.to_string()))
    }
}

/// Parse a display interval string like "5m", "2h", "1d" into a duration
fn parse_interval(interval: &str) -> Option<Duration> {
    let unit = interval.chars().last()?;
    let digits = &interval[..interval.len() - unit.len_utf8()];
    let count: i64 = digits.parse().ok()?;
    if count <= 0 {
        return None;
    }
    match unit {
        's' => Some(Duration::seconds(count)),
        'm' => Some(Duration::minutes(count)),
        'h' => Some(Duration::hours(count)),
        'd' => Some(Duration::days(count)),
        _ => None,
    }
}

/// FNV-1a hash, used only to derive a stable per-service metric offset
fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf29ce484222325;
    for &b in bytes {
        hash ^= b as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}

/// Deterministic demo value for a metric at an instant.
///
/// A slow sine wave plus a per-service phase offset: stable across calls,
/// plausible on a chart, and cheap to produce at any sampling interval.
fn synthesize(metric: MetricKind, seed: u64, t: DateTime<Utc>) -> f64 {
    let phase = (seed % 3600) as f64;
    let wave = ((t.timestamp() as f64 + phase) / 1800.0).sin();
    match metric {
        MetricKind::Latency => 120.0 + 60.0 * wave,
        MetricKind::Throughput => 900.0 + 350.0 * wave,
        MetricKind::ErrorRate => (0.012 + 0.01 * wave).max(0.0),
        MetricKind::Apdex => (0.93 + 0.05 * wave).clamp(0.0, 1.0),
    }
}

#[cfg(test)]
mod tests {
    use pulse_core::{LogLevel, SloMetric, SpanItem};

    use super::*;

    fn backend() -> MemoryBackend {
        MemoryBackend::new(&StoreConfig::demo("checkout", "Checkout API", "api"))
    }

    fn entry(message: &str, level: LogLevel) -> LogEntry {
        LogEntry {
            id: uuid::Uuid::new_v4().to_string(),
            service: "checkout".to_string(),
            timestamp: Utc::now(),
            level,
            message: message.to_string(),
            trace_id: None,
        }
    }

    #[tokio::test]
    async fn query_applies_level_and_tail() {
        let backend = backend();
        for i in 0..10 {
            backend.push_log(entry(&format!("info {i}"), LogLevel::Info));
        }
        backend.push_log(entry("boom", LogLevel::Error));

        let filter = LogFilter {
            level: Some(LogLevel::Error),
            ..Default::default()
        };
        let errors = backend.query_logs(&filter).await.unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "boom");

        let filter = LogFilter {
            tail: Some(3),
            ..Default::default()
        };
        let tail = backend.query_logs(&filter).await.unwrap();
        assert_eq!(tail.len(), 3);
        assert_eq!(tail[2].message, "boom");
    }

    #[tokio::test]
    async fn ring_buffer_drops_oldest_at_capacity() {
        let mut config = StoreConfig::demo("tiny", "Tiny", "api");
        config.capacity = 3;
        let backend = MemoryBackend::new(&config);
        for i in 0..5 {
            backend.push_log(entry(&format!("msg {i}"), LogLevel::Info));
        }
        let logs = backend.query_logs(&LogFilter::default()).await.unwrap();
        assert_eq!(logs.len(), 3);
        assert_eq!(logs[0].message, "msg 2");
    }

    #[tokio::test]
    async fn trace_lookup_and_listing() {
        let backend = backend();
        backend.push_trace(Trace {
            trace_id: "t1".to_string(),
            service: "checkout".to_string(),
            root_span: "GET /cart".to_string(),
            started_at: Utc::now(),
            duration_ms: 42.0,
            spans: vec![SpanItem {
                span_id: "s1".to_string(),
                name: "GET /cart".to_string(),
                timestamp: Utc::now(),
                duration_ms: 42.0,
            }],
        });

        let listed = backend.list_traces(&TraceFilter::default()).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].span_count, 1);

        assert!(backend.get_trace("t1").await.is_ok());
        assert!(matches!(
            backend.get_trace("missing").await,
            Err(BackendError::TraceNotFound(_))
        ));
    }

    #[tokio::test]
    async fn metric_series_is_deterministic_and_sampled() {
        let backend = backend();
        let end = Utc::now();
        let start = end - Duration::hours(1);
        let a = backend
            .query_metrics(MetricKind::Latency, start, end, "5m")
            .await
            .unwrap();
        let b = backend
            .query_metrics(MetricKind::Latency, start, end, "5m")
            .await
            .unwrap();
        assert_eq!(a.points.len(), 13); // inclusive endpoints at 5m over 1h
        assert_eq!(a.points[0].value, b.points[0].value);
    }

    #[tokio::test]
    async fn slo_crud_round_trip() {
        let backend = backend();
        let slo = SloRecord {
            id: "slo-1".to_string(),
            name: "Availability".to_string(),
            metric: SloMetric::Availability,
            target: 0.999,
            sli_value: 0.9995,
            total_minutes: 1440.0,
            actual_downtime_minutes: 0.4,
        };
        backend.create_slo(slo.clone()).await.unwrap();
        assert!(matches!(
            backend.create_slo(slo.clone()).await,
            Err(BackendError::SloExists(_))
        ));
        assert_eq!(backend.list_slos().await.unwrap().len(), 1);
        backend.delete_slo("slo-1").await.unwrap();
        assert!(matches!(
            backend.get_slo("slo-1").await,
            Err(BackendError::SloNotFound(_))
        ));
    }

    #[test]
    fn interval_parsing() {
        assert_eq!(parse_interval("5m"), Some(Duration::minutes(5)));
        assert_eq!(parse_interval("2h"), Some(Duration::hours(2)));
        assert_eq!(parse_interval("1d"), Some(Duration::days(1)));
        assert_eq!(parse_interval(""), None);
        assert_eq!(parse_interval("m"), None);
        assert_eq!(parse_interval("-5m"), None);
        assert_eq!(parse_interval("5x"), None);
        // Multi-byte unit must not panic on the boundary split
        assert_eq!(parse_interval("5µ"), None);
    }
}
