//! Metric time-series models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metric families served per service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// Request latency (ms)
    Latency,
    /// Requests per interval
    Throughput,
    /// Failed-request fraction
    ErrorRate,
    /// Application performance score in [0,1]
    Apdex,
}

impl MetricKind {
    /// URL path segment / wire name for this metric
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Latency => "latency",
            Self::Throughput => "throughput",
            Self::ErrorRate => "error_rate",
            Self::Apdex => "apdex",
        }
    }

    /// Parse a wire name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "latency" => Some(Self::Latency),
            "throughput" => Some(Self::Throughput),
            "error_rate" => Some(Self::ErrorRate),
            "apdex" => Some(Self::Apdex),
            _ => None,
        }
    }
}

/// One sample in a series
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MetricPoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

/// A sampled metric series for one service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricSeries {
    pub metric: MetricKind,
    pub service: String,
    /// Sampling interval the points were produced at (display metadata)
    pub interval: String,
    pub points: Vec<MetricPoint>,
}
