//! Deterministic demo data
//!
//! Seeds a backend with templated log messages (so grouping has something
//! to group), traces whose span durations cover every waterfall bucket,
//! and SLO records in all three health states. The generator is a plain
//! counter-driven sequence: the same config always produces the same
//! dataset.

use chrono::{Duration, Utc};
use pulse_core::{LogEntry, LogLevel, SloMetric, SloRecord, SpanItem, Trace};
use tracing::info;

use crate::backend::MemoryBackend;
use crate::config::StoreConfig;

/// Message templates cycled during seeding; `{}` slots vary per entry so
/// the normalizer has ids to strip
const LOG_TEMPLATES: [(&str, LogLevel); 6] = [
    ("User {} not found", LogLevel::Warning),
    ("Timeout at 0x{} calling payments", LogLevel::Error),
    ("Order {} submitted", LogLevel::Info),
    ("Cache miss for key session-{}", LogLevel::Info),
    ("Upstream returned {} for /inventory", LogLevel::Error),
    ("Slow query took {} ms", LogLevel::Warning),
];

/// Root operations cycled across demo traces
const TRACE_ROOTS: [&str; 3] = ["GET /cart", "POST /checkout", "GET /orders"];

/// Span durations (ms) per trace; chosen to spread across all five
/// waterfall buckets relative to the 500ms maximum
const SPAN_DURATIONS: [f64; 6] = [500.0, 420.0, 320.0, 230.0, 140.0, 60.0];

/// Seed a backend with the demo dataset described by its config
pub fn seed_demo(backend: &MemoryBackend, config: &StoreConfig) {
    if !config.seed.enabled {
        return;
    }
    let now = Utc::now();
    let service = config.id.clone();

    // Traces first so log entries can reference their ids
    let trace_ids: Vec<String> = (0..config.seed.traces)
        .map(|i| {
            let trace_id = format!("trace-{}-{i}", service);
            let started_at = now - Duration::minutes(3 * i as i64 + 1);
            let spans: Vec<SpanItem> = SPAN_DURATIONS
                .iter()
                .enumerate()
                .map(|(j, &duration_ms)| SpanItem {
                    span_id: format!("{trace_id}-s{j}"),
                    name: span_name(j),
                    timestamp: started_at + Duration::milliseconds(10 * j as i64),
                    duration_ms,
                })
                .collect();
            backend.push_trace(Trace {
                trace_id: trace_id.clone(),
                service: service.clone(),
                root_span: TRACE_ROOTS[i % TRACE_ROOTS.len()].to_string(),
                started_at,
                duration_ms: SPAN_DURATIONS[0],
                spans,
            });
            trace_id
        })
        .collect();

    for i in 0..config.seed.logs {
        let (template, level) = LOG_TEMPLATES[i % LOG_TEMPLATES.len()];
        let token = (i * 37 + 11) % 1000;
        let message = template.replace("{}", &token.to_string());
        backend.push_log(LogEntry {
            id: format!("log-{service}-{i}"),
            service: service.clone(),
            timestamp: now - Duration::seconds(30 * (config.seed.logs - i) as i64),
            level,
            message,
            // Every third entry correlates with a demo trace
            trace_id: if i % 3 == 0 && !trace_ids.is_empty() {
                Some(trace_ids[i % trace_ids.len()].clone())
            } else {
                None
            },
        });
    }

    for slo in demo_slos(&service) {
        backend.put_slo(slo);
    }

    info!(
        service = %service,
        logs = config.seed.logs,
        traces = config.seed.traces,
        "seeded demo telemetry"
    );
}

fn span_name(index: usize) -> String {
    const NAMES: [&str; 6] = [
        "handler",
        "SELECT orders",
        "render template",
        "auth check",
        "redis get",
        "serialize response",
    ];
    NAMES[index % NAMES.len()].to_string()
}

/// Three demo SLOs landing in good, warning, and failed states over a
/// one-day window
fn demo_slos(service: &str) -> Vec<SloRecord> {
    vec![
        SloRecord {
            id: format!("{service}-availability"),
            name: "Availability".to_string(),
            metric: SloMetric::Availability,
            target: 0.999,
            sli_value: 0.999,
            total_minutes: 1440.0,
            // 0.5 of 1.44 allowed minutes: ~35% used
            actual_downtime_minutes: 0.5,
        },
        SloRecord {
            id: format!("{service}-latency"),
            name: "P95 latency under 300ms".to_string(),
            metric: SloMetric::Latency,
            target: 0.99,
            sli_value: 0.99,
            total_minutes: 1440.0,
            // 12 of 14.4 allowed minutes: ~83% used
            actual_downtime_minutes: 12.0,
        },
        SloRecord {
            id: format!("{service}-errors"),
            name: "Error rate under 1%".to_string(),
            metric: SloMetric::ErrorRate,
            target: 0.99,
            sli_value: 0.98,
            total_minutes: 1440.0,
            // 40 of 28.8 allowed minutes: budget blown
            actual_downtime_minutes: 40.0,
        },
    ]
}

#[cfg(test)]
mod tests {
    use pulse_core::{LogFilter, TelemetryBackend, TraceFilter};

    use super::*;

    #[tokio::test]
    async fn seeding_matches_config_counts() {
        let config = StoreConfig::demo("checkout", "Checkout API", "api");
        let backend = MemoryBackend::new(&config);
        seed_demo(&backend, &config);

        assert_eq!(backend.log_count(), config.seed.logs);
        let traces = backend.list_traces(&TraceFilter::default()).await.unwrap();
        assert_eq!(traces.len(), config.seed.traces);
        assert_eq!(backend.list_slos().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn seeding_is_disabled_by_config() {
        let mut config = StoreConfig::demo("quiet", "Quiet", "worker");
        config.seed.enabled = false;
        let backend = MemoryBackend::new(&config);
        seed_demo(&backend, &config);
        assert_eq!(backend.log_count(), 0);
    }

    #[tokio::test]
    async fn seeded_logs_reference_seeded_traces() {
        let config = StoreConfig::demo("checkout", "Checkout API", "api");
        let backend = MemoryBackend::new(&config);
        seed_demo(&backend, &config);

        let logs = backend.query_logs(&LogFilter::default()).await.unwrap();
        let with_trace: Vec<_> = logs.iter().filter_map(|e| e.trace_id.as_ref()).collect();
        assert!(!with_trace.is_empty());
        for trace_id in with_trace {
            assert!(backend.get_trace(trace_id).await.is_ok());
        }
    }
}
