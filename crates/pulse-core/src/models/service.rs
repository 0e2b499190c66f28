//! Service (monitored entity) models

use serde::{Deserialize, Serialize};

/// Information about a monitored service (API server, worker, database, etc.)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    /// Unique identifier for this service
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Service kind (api, worker, database, frontend, etc.)
    #[serde(rename = "type")]
    pub kind: String,
    /// Description of this service
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Link to this service's resources
    pub href: String,
    /// Current status (e.g., "healthy", "degraded", "down")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Capabilities of a telemetry backend
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Capabilities {
    /// Serves log queries
    pub logs: bool,
    /// Supports log ingestion (POST)
    pub log_ingest: bool,
    /// Supports live log streaming (SSE)
    pub log_stream: bool,
    /// Serves distributed traces
    pub traces: bool,
    /// Serves metric time series
    pub metrics: bool,
    /// Serves SLO definitions
    pub slos: bool,
    /// Supports SLO create/update/delete
    pub slo_write: bool,
}

impl Capabilities {
    /// Capabilities of a full APM-instrumented service
    pub fn full() -> Self {
        Self {
            logs: true,
            log_ingest: true,
            log_stream: true,
            traces: true,
            metrics: true,
            slos: true,
            slo_write: true,
        }
    }

    /// Capabilities of a logs-only source (e.g., a batch job shipping logs)
    pub fn logs_only() -> Self {
        Self {
            logs: true,
            log_ingest: true,
            log_stream: true,
            ..Self::default()
        }
    }
}
