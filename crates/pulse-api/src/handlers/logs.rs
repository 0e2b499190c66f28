//! Log handlers
//!
//! Supports:
//! - GET /logs - query with filtering
//! - POST /logs - ingest an entry (external log shipper surface)
//! - GET /logs/groups - template-grouped view, largest group first
//! - GET /logs/stream - live SSE feed

use std::convert::Infallible;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::Json;
use chrono::{DateTime, Utc};
use futures::Stream;
use pulse_core::{LogEntry, LogFilter, LogLevel};
use pulse_insight::{group_logs, resolve, LogGroup, RangeKey, DEFAULT_MAX_GROUPS};
use serde::{Deserialize, Serialize};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct LogsResponse {
    pub items: Vec<LogEntryResponse>,
    pub total_count: usize,
}

#[derive(Serialize)]
pub struct LogEntryResponse {
    pub id: String,
    pub service: String,
    pub timestamp: DateTime<Utc>,
    pub level: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
}

impl From<&LogEntry> for LogEntryResponse {
    fn from(entry: &LogEntry) -> Self {
        Self {
            id: entry.id.clone(),
            service: entry.service.clone(),
            timestamp: entry.timestamp,
            level: entry.level.as_str().to_string(),
            message: entry.message.clone(),
            trace_id: entry.trace_id.clone(),
        }
    }
}

#[derive(Deserialize, Default)]
pub struct LogFilterQuery {
    pub level: Option<String>,
    pub since: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
    pub pattern: Option<String>,
    pub trace_id: Option<String>,
    pub limit: Option<usize>,
    pub tail: Option<usize>,
    /// Symbolic range key (e.g. "15min", "1h"); explicit since/until win
    pub range: Option<String>,
}

impl LogFilterQuery {
    fn into_filter(self) -> Result<LogFilter, ApiError> {
        let mut filter = LogFilter {
            level: self.level.as_deref().map(LogLevel::from_name),
            since: self.since,
            until: self.until,
            pattern: self.pattern,
            trace_id: self.trace_id,
            limit: self.limit,
            tail: self.tail,
        };
        if let Some(range) = self.range {
            let resolved = resolve(range.parse::<RangeKey>()?);
            filter.since = filter.since.or(Some(resolved.start));
            filter.until = filter.until.or(Some(resolved.end));
        }
        Ok(filter)
    }
}

/// GET /apm/v1/services/:service_id/logs
pub async fn get_logs(
    State(state): State<AppState>,
    Path(service_id): Path<String>,
    Query(query): Query<LogFilterQuery>,
) -> Result<Json<LogsResponse>, ApiError> {
    let backend = state.get_backend(&service_id)?;
    if !backend.capabilities().logs {
        return Err(ApiError::NotImplemented(
            "This service does not serve logs".to_string(),
        ));
    }

    let filter = query.into_filter()?;
    let entries = backend.query_logs(&filter).await?;
    let items: Vec<LogEntryResponse> = entries.iter().map(LogEntryResponse::from).collect();
    let total_count = items.len();
    Ok(Json(LogsResponse { items, total_count }))
}

/// Request body for log ingestion
#[derive(Deserialize)]
pub struct IngestLogRequest {
    /// Defaults to the ingestion instant
    pub timestamp: Option<DateTime<Utc>>,
    /// "error", "warning", or "info"; unknown names ingest as info
    #[serde(default)]
    pub level: Option<String>,
    pub message: String,
    pub trace_id: Option<String>,
}

/// POST /apm/v1/services/:service_id/logs
pub async fn ingest_log(
    State(state): State<AppState>,
    Path(service_id): Path<String>,
    Json(request): Json<IngestLogRequest>,
) -> Result<(StatusCode, Json<LogEntryResponse>), ApiError> {
    let backend = state.get_backend(&service_id)?;
    if !backend.capabilities().log_ingest {
        return Err(ApiError::NotImplemented(
            "This service does not accept log ingestion".to_string(),
        ));
    }

    let entry = LogEntry {
        id: uuid::Uuid::new_v4().to_string(),
        service: service_id,
        timestamp: request.timestamp.unwrap_or_else(Utc::now),
        level: request
            .level
            .as_deref()
            .map(LogLevel::from_name)
            .unwrap_or_default(),
        message: request.message,
        trace_id: request.trace_id,
    };
    let stored = backend.ingest_log(entry).await?;
    Ok((StatusCode::CREATED, Json(LogEntryResponse::from(&stored))))
}

#[derive(Deserialize, Default)]
pub struct GroupQuery {
    /// Maximum groups returned, default 8
    pub max_groups: Option<usize>,
    pub level: Option<String>,
    pub range: Option<String>,
}

#[derive(Serialize)]
pub struct LogGroupsResponse {
    pub groups: Vec<LogGroupResponse>,
    pub total_entries: usize,
}

#[derive(Serialize)]
pub struct LogGroupResponse {
    pub key: String,
    pub title: String,
    pub count: usize,
    pub items: Vec<LogEntryResponse>,
}

impl From<&LogGroup> for LogGroupResponse {
    fn from(group: &LogGroup) -> Self {
        Self {
            key: group.key.clone(),
            title: group.title.clone(),
            count: group.items.len(),
            items: group.items.iter().map(LogEntryResponse::from).collect(),
        }
    }
}

/// GET /apm/v1/services/:service_id/logs/groups
/// Template-grouped log view, largest group first
pub async fn get_log_groups(
    State(state): State<AppState>,
    Path(service_id): Path<String>,
    Query(query): Query<GroupQuery>,
) -> Result<Json<LogGroupsResponse>, ApiError> {
    let backend = state.get_backend(&service_id)?;
    if !backend.capabilities().logs {
        return Err(ApiError::NotImplemented(
            "This service does not serve logs".to_string(),
        ));
    }

    let filter = LogFilterQuery {
        level: query.level,
        range: query.range,
        ..Default::default()
    }
    .into_filter()?;
    let entries = backend.query_logs(&filter).await?;

    let max_groups = query.max_groups.unwrap_or(DEFAULT_MAX_GROUPS);
    let groups = group_logs(&entries, max_groups);
    Ok(Json(LogGroupsResponse {
        groups: groups.iter().map(LogGroupResponse::from).collect(),
        total_entries: entries.len(),
    }))
}

/// GET /apm/v1/services/:service_id/logs/stream
/// Live log feed as Server-Sent Events
pub async fn stream_logs(
    State(state): State<AppState>,
    Path(service_id): Path<String>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, ApiError> {
    let backend = state.get_backend(&service_id)?;
    if !backend.capabilities().log_stream {
        return Err(ApiError::NotImplemented(
            "This service does not support live log streaming".to_string(),
        ));
    }

    let receiver = backend.stream_logs().await?;
    tracing::debug!(service = %service_id, "log stream subscriber connected");

    let stream = BroadcastStream::new(receiver)
        // A lagging subscriber misses entries rather than stalling the feed
        .filter_map(|item| item.ok())
        .map(|entry| {
            let event = Event::default()
                .event("log")
                .json_data(LogEntryResponse::from(&entry))
                .unwrap_or_else(|_| Event::default().event("log").data("{}"));
            Ok::<Event, Infallible>(event)
        });

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}
