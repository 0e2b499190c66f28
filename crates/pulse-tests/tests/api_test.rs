//! API tests against a seeded in-process router
//!
//! Run with: cargo test -p pulse-tests --test api_test

use std::sync::Arc;

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::{DateTime, Utc};
use pretty_assertions::assert_eq;
use pulse_api::{create_router, AppState};
use pulse_core::{
    BackendError, BackendResult, Capabilities, LogEntry, LogFilter, MetricKind, MetricSeries,
    ServiceInfo, SloRecord, TelemetryBackend, Trace, TraceFilter, TraceSummary,
};
use pulse_tests::seeded_state;
use serde_json::{json, Value};

fn server() -> TestServer {
    TestServer::new(create_router(seeded_state(&["checkout", "payments"])))
        .expect("router should start")
}

// =============================================================================
// Services
// =============================================================================

#[tokio::test]
async fn health_check() {
    let server = server();
    let response = server.get("/health").await;
    response.assert_status_ok();
    assert_eq!(response.text(), "OK");
}

#[tokio::test]
async fn list_services_returns_seeded_services() {
    let server = server();
    let body: Value = server.get("/apm/v1/services").await.json();
    assert_eq!(body["total_count"], 2);
    assert_eq!(body["items"][0]["id"], "checkout");
    assert_eq!(body["items"][1]["id"], "payments");
}

#[tokio::test]
async fn get_service_includes_capabilities() {
    let server = server();
    let body: Value = server.get("/apm/v1/services/checkout").await.json();
    assert_eq!(body["id"], "checkout");
    assert_eq!(body["capabilities"]["logs"], true);
    assert_eq!(body["capabilities"]["slo_write"], true);
}

#[tokio::test]
async fn unknown_service_returns_404() {
    let server = server();
    let response = server.get("/apm/v1/services/nope").await;
    assert_eq!(response.status_code().as_u16(), 404);
    let body: Value = response.json();
    assert_eq!(body["error"], "not_found");
}

// =============================================================================
// Logs
// =============================================================================

#[tokio::test]
async fn log_level_filter_includes_more_severe_only() {
    let server = server();
    let body: Value = server
        .get("/apm/v1/services/checkout/logs")
        .add_query_param("level", "error")
        .await
        .json();
    let items = body["items"].as_array().unwrap();
    assert!(!items.is_empty());
    for item in items {
        assert_eq!(item["level"], "error");
    }
}

#[tokio::test]
async fn log_tail_returns_most_recent() {
    let server = server();
    let body: Value = server
        .get("/apm/v1/services/checkout/logs")
        .add_query_param("tail", "5")
        .await
        .json();
    assert_eq!(body["total_count"], 5);
}

#[tokio::test]
async fn ingested_log_is_queryable() {
    let server = server();
    let response = server
        .post("/apm/v1/services/checkout/logs")
        .json(&json!({
            "level": "error",
            "message": "Synthetic failure for test xyzzy-123",
        }))
        .await;
    assert_eq!(response.status_code().as_u16(), 201);
    let created: Value = response.json();
    assert_eq!(created["level"], "error");
    assert_eq!(created["service"], "checkout");

    let body: Value = server
        .get("/apm/v1/services/checkout/logs")
        .add_query_param("pattern", "xyzzy")
        .await
        .json();
    assert_eq!(body["total_count"], 1);
}

#[tokio::test]
async fn log_groups_are_ranked_and_complete() {
    let server = server();
    let body: Value = server.get("/apm/v1/services/checkout/logs/groups").await.json();

    // Six seeded templates at 120 entries, well under the default cap of 8
    let groups = body["groups"].as_array().unwrap();
    assert_eq!(groups.len(), 6);
    assert_eq!(body["total_entries"], 120);

    let counts: Vec<u64> = groups
        .iter()
        .map(|g| g["count"].as_u64().unwrap())
        .collect();
    let total: u64 = counts.iter().sum();
    assert_eq!(total, 120);
    for pair in counts.windows(2) {
        assert!(pair[0] >= pair[1], "groups must be largest-first");
    }
}

#[tokio::test]
async fn log_groups_honor_max_groups() {
    let server = server();
    let body: Value = server
        .get("/apm/v1/services/checkout/logs/groups")
        .add_query_param("max_groups", "3")
        .await
        .json();
    assert_eq!(body["groups"].as_array().unwrap().len(), 3);
    // Entries in dropped groups are not re-counted into the kept ones
    assert_eq!(body["total_entries"], 120);
}

#[tokio::test]
async fn log_groups_collapse_numeric_variants() {
    let server = server();
    let body: Value = server.get("/apm/v1/services/checkout/logs/groups").await.json();
    let keys: Vec<&str> = body["groups"]
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["key"].as_str().unwrap())
        .collect();
    assert!(keys.contains(&"user not found"));
    assert!(keys.contains(&"timeout at calling payments"));
}

#[tokio::test]
async fn log_groups_reject_unknown_range() {
    let server = server();
    let response = server
        .get("/apm/v1/services/checkout/logs/groups")
        .add_query_param("range", "2d")
        .await;
    assert_eq!(response.status_code().as_u16(), 400);
}

#[tokio::test]
async fn log_query_accepts_sub_hour_range() {
    let server = server();
    let response = server
        .get("/apm/v1/services/checkout/logs")
        .add_query_param("range", "15min")
        .await;
    response.assert_status_ok();
}

// =============================================================================
// Traces
// =============================================================================

#[tokio::test]
async fn trace_listing_and_detail() {
    let server = server();
    let body: Value = server.get("/apm/v1/services/checkout/traces").await.json();
    assert_eq!(body["total_count"], 6);

    let trace_id = body["items"][0]["trace_id"].as_str().unwrap();
    let detail: Value = server
        .get(&format!("/apm/v1/services/checkout/traces/{trace_id}"))
        .await
        .json();
    assert_eq!(detail["trace_id"], trace_id);
    assert_eq!(detail["spans"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn waterfall_ranks_spans_and_buckets_them() {
    let server = server();
    let traces: Value = server.get("/apm/v1/services/checkout/traces").await.json();
    let trace_id = traces["items"][0]["trace_id"].as_str().unwrap();

    let body: Value = server
        .get(&format!(
            "/apm/v1/services/checkout/traces/{trace_id}/waterfall"
        ))
        .await
        .json();
    assert_eq!(body["max_duration_ms"], 500.0);

    let items = body["items"].as_array().unwrap();
    // Sorted by descending duration
    let durations: Vec<f64> = items
        .iter()
        .map(|i| i["duration_ms"].as_f64().unwrap())
        .collect();
    for pair in durations.windows(2) {
        assert!(pair[0] >= pair[1]);
    }

    // The longest span is the slowest bucket, the shortest the fastest
    assert_eq!(items[0]["bucket"], "Very Slow");
    assert_eq!(items[0]["color"], "#f43f5e");
    assert_eq!(items[items.len() - 1]["bucket"], "Fast");
    assert_eq!(items[items.len() - 1]["color"], "#60a5fa");

    // Seeded durations cover every severity
    let buckets: Vec<&str> = items.iter().map(|i| i["bucket"].as_str().unwrap()).collect();
    for expected in ["Fast", "Normal", "Medium", "Slow", "Very Slow"] {
        assert!(buckets.contains(&expected), "missing bucket {expected}");
    }
}

#[tokio::test]
async fn unknown_trace_returns_404() {
    let server = server();
    let response = server
        .get("/apm/v1/services/checkout/traces/missing/waterfall")
        .await;
    assert_eq!(response.status_code().as_u16(), 404);
}

// =============================================================================
// Metrics
// =============================================================================

#[tokio::test]
async fn metric_series_uses_range_interval() {
    let server = server();
    let body: Value = server
        .get("/apm/v1/services/checkout/metrics/latency")
        .add_query_param("range", "1h")
        .await
        .json();
    assert_eq!(body["interval"], "5m");
    // Inclusive endpoints at 5m over an hour
    assert_eq!(body["points"].as_array().unwrap().len(), 13);
}

#[tokio::test]
async fn metric_chart_rejects_sub_hour_range() {
    let server = server();
    let response = server
        .get("/apm/v1/services/checkout/metrics/latency")
        .add_query_param("range", "15min")
        .await;
    assert_eq!(response.status_code().as_u16(), 400);
}

#[tokio::test]
async fn unknown_metric_returns_400() {
    let server = server();
    let response = server
        .get("/apm/v1/services/checkout/metrics/goodput")
        .await;
    assert_eq!(response.status_code().as_u16(), 400);
}

// =============================================================================
// SLOs
// =============================================================================

#[tokio::test]
async fn seeded_slos_cover_all_statuses() {
    let server = server();
    for (slo_id, expected) in [
        ("checkout-availability", "good"),
        ("checkout-latency", "warning"),
        ("checkout-errors", "failed"),
    ] {
        let body: Value = server
            .get(&format!("/apm/v1/services/checkout/slos/{slo_id}/status"))
            .add_query_param("range", "1d")
            .await
            .json();
        assert_eq!(body["status"], expected, "slo {slo_id}");
    }
}

#[tokio::test]
async fn slo_status_stays_finite_with_perfect_sli() {
    let server = server();
    server
        .post("/apm/v1/services/checkout/slos")
        .json(&json!({
            "id": "perfect",
            "name": "Perfect availability",
            "metric": "availability",
            "target": 1.0,
            "sli_value": 1.0,
            "total_minutes": 1440.0,
            "actual_downtime_minutes": 10.0,
        }))
        .await
        .assert_status_success();

    let body: Value = server
        .get("/apm/v1/services/checkout/slos/perfect/status")
        .add_query_param("range", "1d")
        .await
        .json();
    // SLI clamps to 0.999, so the budget is positive and the rate finite
    assert_eq!(body["adjusted_sli"], 0.999);
    assert!(body["error_budget_used_rate"].as_f64().unwrap().is_finite());
    assert_eq!(body["status"], "failed");
}

#[tokio::test]
async fn slo_crud_round_trip() {
    let server = server();

    let response = server
        .post("/apm/v1/services/payments/slos")
        .json(&json!({
            "id": "settle-latency",
            "name": "Settlement latency",
            "metric": "latency",
            "target": 0.99,
            "sli_value": 0.995,
            "total_minutes": 1440.0,
            "actual_downtime_minutes": 1.0,
        }))
        .await;
    assert_eq!(response.status_code().as_u16(), 201);

    // Duplicate id conflicts
    let response = server
        .post("/apm/v1/services/payments/slos")
        .json(&json!({
            "id": "settle-latency",
            "name": "Settlement latency",
            "metric": "latency",
            "target": 0.99,
            "sli_value": 0.995,
            "total_minutes": 1440.0,
            "actual_downtime_minutes": 1.0,
        }))
        .await;
    assert_eq!(response.status_code().as_u16(), 409);

    // Update, then delete
    server
        .put("/apm/v1/services/payments/slos/settle-latency")
        .json(&json!({
            "name": "Settlement latency",
            "metric": "latency",
            "target": 0.99,
            "sli_value": 0.97,
            "total_minutes": 1440.0,
            "actual_downtime_minutes": 1.0,
        }))
        .await
        .assert_status_ok();

    let response = server
        .delete("/apm/v1/services/payments/slos/settle-latency")
        .await;
    assert_eq!(response.status_code().as_u16(), 204);

    let response = server
        .get("/apm/v1/services/payments/slos/settle-latency")
        .await;
    assert_eq!(response.status_code().as_u16(), 404);
}

#[tokio::test]
async fn slo_payload_is_validated() {
    let server = server();
    let response = server
        .post("/apm/v1/services/checkout/slos")
        .json(&json!({
            "name": "Broken",
            "metric": "availability",
            "target": 1.5,
            "sli_value": 0.99,
            "total_minutes": 1440.0,
            "actual_downtime_minutes": 0.0,
        }))
        .await;
    assert_eq!(response.status_code().as_u16(), 400);
}

// =============================================================================
// Capability gating
// =============================================================================

/// A logs-only source, like a batch job shipping logs. Detail lookups
/// answer with not-found so the tests can tell a capability rejection
/// (501) from a backend miss (404).
struct LogShipperBackend {
    info: ServiceInfo,
    capabilities: Capabilities,
}

impl LogShipperBackend {
    fn new(id: &str) -> Self {
        Self {
            info: ServiceInfo {
                id: id.to_string(),
                name: format!("{id} shipper"),
                kind: "worker".to_string(),
                description: None,
                href: format!("/apm/v1/services/{id}"),
                status: Some("healthy".to_string()),
            },
            capabilities: Capabilities::logs_only(),
        }
    }
}

#[async_trait]
impl TelemetryBackend for LogShipperBackend {
    fn service_info(&self) -> &ServiceInfo {
        &self.info
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    async fn query_logs(&self, _filter: &LogFilter) -> BackendResult<Vec<LogEntry>> {
        Ok(Vec::new())
    }

    async fn list_traces(&self, _filter: &TraceFilter) -> BackendResult<Vec<TraceSummary>> {
        Err(BackendError::NotSupported("list_traces".to_string()))
    }

    async fn get_trace(&self, trace_id: &str) -> BackendResult<Trace> {
        Err(BackendError::TraceNotFound(trace_id.to_string()))
    }

    async fn query_metrics(
        &self,
        _metric: MetricKind,
        _start: DateTime<Utc>,
        _end: DateTime<Utc>,
        _interval: &str,
    ) -> BackendResult<MetricSeries> {
        Err(BackendError::NotSupported("query_metrics".to_string()))
    }

    async fn list_slos(&self) -> BackendResult<Vec<SloRecord>> {
        Err(BackendError::NotSupported("list_slos".to_string()))
    }

    async fn get_slo(&self, slo_id: &str) -> BackendResult<SloRecord> {
        Err(BackendError::SloNotFound(slo_id.to_string()))
    }
}

fn logs_only_server() -> TestServer {
    let state = AppState::single("shipper", Arc::new(LogShipperBackend::new("shipper")));
    TestServer::new(create_router(state)).expect("router should start")
}

#[tokio::test]
async fn detail_routes_honor_capabilities() {
    let server = logs_only_server();
    // Detail routes must reject on capability, not fall through to the
    // backend's 404
    for path in [
        "/apm/v1/services/shipper/traces/t1",
        "/apm/v1/services/shipper/traces/t1/waterfall",
        "/apm/v1/services/shipper/slos/s1",
        "/apm/v1/services/shipper/slos/s1/status",
    ] {
        let response = server.get(path).await;
        assert_eq!(response.status_code().as_u16(), 501, "path {path}");
        let body: Value = response.json();
        assert_eq!(body["error"], "not_implemented", "path {path}");
    }
}

#[tokio::test]
async fn logs_only_service_still_serves_logs() {
    let server = logs_only_server();
    let response = server.get("/apm/v1/services/shipper/logs").await;
    response.assert_status_ok();
}

// =============================================================================
// Notifications
// =============================================================================

#[tokio::test]
async fn notification_config_round_trip() {
    let server = server();

    let response = server
        .post("/apm/v1/notifications/channels")
        .json(&json!({
            "id": "oncall-slack",
            "name": "On-call Slack",
            "kind": "slack",
            "endpoint": "#oncall",
        }))
        .await;
    assert_eq!(response.status_code().as_u16(), 201);

    // Rule referencing an unknown channel is rejected
    let response = server
        .post("/apm/v1/notifications/rules")
        .json(&json!({
            "name": "Budget breach",
            "channel_id": "missing",
            "trigger": "slo_breach",
        }))
        .await;
    assert_eq!(response.status_code().as_u16(), 400);

    server
        .post("/apm/v1/notifications/rules")
        .json(&json!({
            "id": "breach-to-slack",
            "name": "Budget breach",
            "channel_id": "oncall-slack",
            "trigger": "slo_breach",
        }))
        .await
        .assert_status_success();

    let rules: Value = server.get("/apm/v1/notifications/rules").await.json();
    assert_eq!(rules["total_count"], 1);

    // Deleting the channel takes its rules with it
    let response = server
        .delete("/apm/v1/notifications/channels/oncall-slack")
        .await;
    assert_eq!(response.status_code().as_u16(), 204);

    let rules: Value = server.get("/apm/v1/notifications/rules").await.json();
    assert_eq!(rules["total_count"], 0);
}
