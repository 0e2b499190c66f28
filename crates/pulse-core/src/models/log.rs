//! Log entry models
//!
//! Entries are immutable once ingested; filtering and grouping never
//! mutate them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    /// Unique identifier for this entry
    pub id: String,
    /// Service that emitted the log
    pub service: String,
    /// Timestamp of the log entry
    pub timestamp: DateTime<Utc>,
    /// Severity level
    pub level: LogLevel,
    /// Log message content
    pub message: String,
    /// Trace correlation id, if the log was emitted inside a traced request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
}

/// Log severity levels, most severe first
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Error conditions
    Error = 0,
    /// Warning conditions
    Warning = 1,
    /// Informational messages
    #[default]
    Info = 2,
}

impl LogLevel {
    /// Parse a level name, case-insensitive. Unknown names map to Info.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "error" => Self::Error,
            "warning" | "warn" => Self::Warning,
            _ => Self::Info,
        }
    }

    /// Lowercase display name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

/// Filter for querying logs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogFilter {
    /// Filter by severity (this level and more severe)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<LogLevel>,
    /// Logs since this time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<DateTime<Utc>>,
    /// Logs until this time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub until: Option<DateTime<Utc>>,
    /// Substring to search for in messages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Filter by trace correlation id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
    /// Maximum number of entries to return
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    /// Return last N entries (tail)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tail: Option<usize>,
}

impl LogFilter {
    /// True if the entry passes every set criterion (limit/tail excluded;
    /// those apply to the result set, not per entry)
    pub fn matches(&self, entry: &LogEntry) -> bool {
        if let Some(level) = self.level {
            if entry.level > level {
                return false;
            }
        }
        if let Some(since) = self.since {
            if entry.timestamp < since {
                return false;
            }
        }
        if let Some(until) = self.until {
            if entry.timestamp > until {
                return false;
            }
        }
        if let Some(pattern) = &self.pattern {
            if !entry.message.contains(pattern.as_str()) {
                return false;
            }
        }
        if let Some(trace_id) = &self.trace_id {
            if entry.trace_id.as_deref() != Some(trace_id.as_str()) {
                return false;
            }
        }
        true
    }
}
