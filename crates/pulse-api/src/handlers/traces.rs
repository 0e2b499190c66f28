//! Trace handlers
//!
//! Supports:
//! - GET /traces - list trace summaries
//! - GET /traces/{id} - full trace with spans
//! - GET /traces/{id}/waterfall - spans ranked by duration with severity buckets

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::{DateTime, Utc};
use pulse_core::{Trace, TraceFilter, TraceSummary};
use pulse_insight::bucket_spans;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct TracesResponse {
    pub items: Vec<TraceSummary>,
    pub total_count: usize,
}

#[derive(Deserialize, Default)]
pub struct TraceFilterQuery {
    pub since: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
    pub min_duration_ms: Option<f64>,
    pub limit: Option<usize>,
}

/// GET /apm/v1/services/:service_id/traces
pub async fn list_traces(
    State(state): State<AppState>,
    Path(service_id): Path<String>,
    Query(query): Query<TraceFilterQuery>,
) -> Result<Json<TracesResponse>, ApiError> {
    let backend = state.get_backend(&service_id)?;
    if !backend.capabilities().traces {
        return Err(ApiError::NotImplemented(
            "This service does not serve traces".to_string(),
        ));
    }

    let filter = TraceFilter {
        since: query.since,
        until: query.until,
        min_duration_ms: query.min_duration_ms,
        limit: query.limit,
    };
    let items = backend.list_traces(&filter).await?;
    let total_count = items.len();
    Ok(Json(TracesResponse { items, total_count }))
}

/// GET /apm/v1/services/:service_id/traces/:trace_id
pub async fn get_trace(
    State(state): State<AppState>,
    Path((service_id, trace_id)): Path<(String, String)>,
) -> Result<Json<Trace>, ApiError> {
    let backend = state.get_backend(&service_id)?;
    if !backend.capabilities().traces {
        return Err(ApiError::NotImplemented(
            "This service does not serve traces".to_string(),
        ));
    }
    Ok(Json(backend.get_trace(&trace_id).await?))
}

#[derive(Serialize)]
pub struct WaterfallResponse {
    pub trace_id: String,
    pub max_duration_ms: f64,
    /// Spans sorted by descending duration
    pub items: Vec<WaterfallItem>,
}

#[derive(Serialize)]
pub struct WaterfallItem {
    pub span_id: String,
    pub name: String,
    pub timestamp: DateTime<Utc>,
    pub duration_ms: f64,
    /// Bar length as a fraction of the longest span
    pub ratio: f64,
    pub bucket: String,
    pub color: String,
}

/// GET /apm/v1/services/:service_id/traces/:trace_id/waterfall
/// Duration-ranked span view for the waterfall chart
pub async fn get_waterfall(
    State(state): State<AppState>,
    Path((service_id, trace_id)): Path<(String, String)>,
) -> Result<Json<WaterfallResponse>, ApiError> {
    let backend = state.get_backend(&service_id)?;
    if !backend.capabilities().traces {
        return Err(ApiError::NotImplemented(
            "This service does not serve traces".to_string(),
        ));
    }
    let trace = backend.get_trace(&trace_id).await?;

    let max_duration_ms = trace
        .spans
        .iter()
        .map(|s| s.duration_ms)
        .fold(0.0, f64::max);

    let mut items: Vec<WaterfallItem> = bucket_spans(&trace.spans)
        .into_iter()
        .map(|(span, bucket)| WaterfallItem {
            span_id: span.span_id.clone(),
            name: span.name.clone(),
            timestamp: span.timestamp,
            duration_ms: span.duration_ms,
            ratio: pulse_insight::duration_ratio(span.duration_ms, max_duration_ms),
            bucket: bucket.label().to_string(),
            color: bucket.color().to_string(),
        })
        .collect();
    items.sort_by(|a, b| b.duration_ms.total_cmp(&a.duration_ms));

    Ok(Json(WaterfallResponse {
        trace_id: trace.trace_id,
        max_duration_ms,
        items,
    }))
}
