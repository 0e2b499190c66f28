//! SLO definition models
//!
//! `SloRecord` is the base definition; derived error-budget values are
//! recomputed per time-range selection and never persisted.

use serde::{Deserialize, Serialize};

/// The indicator an SLO targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SloMetric {
    Availability,
    Latency,
    ErrorRate,
}

/// A service-level objective definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SloRecord {
    /// Unique identifier
    pub id: String,
    /// Human-readable name (e.g., "Checkout availability")
    pub name: String,
    /// Indicator this SLO targets
    pub metric: SloMetric,
    /// Target threshold, a fraction in (0, 1]
    pub target: f64,
    /// Measured SLI value, a fraction in [0, 1]
    pub sli_value: f64,
    /// Total elapsed minutes in the base observation window
    pub total_minutes: f64,
    /// Measured downtime minutes in the base observation window
    pub actual_downtime_minutes: f64,
}
