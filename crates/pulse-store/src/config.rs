//! Store backend configuration

use serde::{Deserialize, Serialize};

/// Configuration for one in-memory store backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Service identifier
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Service kind (api, worker, database, frontend, ...)
    #[serde(default = "default_kind")]
    pub kind: String,
    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Log ring-buffer capacity; the oldest entry is dropped beyond this
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    /// Demo data seeding
    #[serde(default)]
    pub seed: SeedConfig,
}

fn default_kind() -> String {
    "api".to_string()
}

fn default_capacity() -> usize {
    10_000
}

/// Demo data seeding configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Whether to seed demo data at startup
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Number of demo log entries
    #[serde(default = "default_log_count")]
    pub logs: usize,
    /// Number of demo traces
    #[serde(default = "default_trace_count")]
    pub traces: usize,
}

fn default_enabled() -> bool {
    true
}

fn default_log_count() -> usize {
    120
}

fn default_trace_count() -> usize {
    6
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            logs: default_log_count(),
            traces: default_trace_count(),
        }
    }
}

impl StoreConfig {
    /// A demo service config with seeding enabled
    pub fn demo(id: impl Into<String>, name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: kind.into(),
            description: None,
            capacity: default_capacity(),
            seed: SeedConfig::default(),
        }
    }
}
