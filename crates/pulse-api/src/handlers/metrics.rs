//! Metric chart handlers

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::{DateTime, Utc};
use pulse_core::{MetricKind, MetricPoint};
use pulse_insight::{resolve, RangeKey};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct MetricQuery {
    /// Symbolic range key; metric charts only accept the coarse set
    #[serde(default = "default_range")]
    pub range: String,
}

fn default_range() -> String {
    "1h".to_string()
}

#[derive(Serialize)]
pub struct MetricSeriesResponse {
    pub metric: String,
    pub service: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub interval: String,
    pub points: Vec<MetricPoint>,
}

/// GET /apm/v1/services/:service_id/metrics/:metric
/// Sampled series over the selected range, at the range's fixed interval
pub async fn get_metric_series(
    State(state): State<AppState>,
    Path((service_id, metric)): Path<(String, String)>,
    Query(query): Query<MetricQuery>,
) -> Result<Json<MetricSeriesResponse>, ApiError> {
    let backend = state.get_backend(&service_id)?;
    if !backend.capabilities().metrics {
        return Err(ApiError::NotImplemented(
            "This service does not serve metrics".to_string(),
        ));
    }

    let metric = MetricKind::from_name(&metric)
        .ok_or_else(|| ApiError::BadRequest(format!("Unknown metric: {}", metric)))?;

    let key: RangeKey = query.range.parse()?;
    if !key.is_chart_key() {
        return Err(ApiError::BadRequest(format!(
            "Range {} is too fine for metric charts; use 1h or coarser",
            key
        )));
    }
    let range = resolve(key);

    let series = backend
        .query_metrics(metric, range.start, range.end, range.interval)
        .await?;

    Ok(Json(MetricSeriesResponse {
        metric: series.metric.as_str().to_string(),
        service: series.service,
        start: range.start,
        end: range.end,
        interval: series.interval,
        points: series.points,
    }))
}
