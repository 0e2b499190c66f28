//! SLO error-budget arithmetic
//!
//! Derives allowed downtime, budget consumption, and a tri-state status
//! from a base [`SloRecord`] and a per-time-range adjustment. Derived
//! values are never persisted; they are rebuilt whenever the selected
//! range changes.

use pulse_core::SloRecord;
use serde::{Deserialize, Serialize};

use crate::timerange::RangeKey;

/// The SLI is clamped to this ceiling before the budget is derived.
/// A fixed business rule: a "perfect" 1.0 would leave a zero budget and
/// make every downtime minute an immediate breach.
const SLI_CEILING: f64 = 0.999;

/// Minutes in a day, the reference window for the downtime multiplier
const DAY_MINUTES: f64 = 24.0 * 60.0;

/// Tri-state SLO health
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SloStatus {
    /// Budget consumption under 70%
    Good,
    /// Budget consumption in [70%, 100%)
    Warning,
    /// Budget exhausted
    Failed,
}

impl SloStatus {
    /// Classify from the fraction of error budget consumed
    pub fn from_used_rate(used_rate: f64) -> Self {
        let used_percent = used_rate * 100.0;
        if used_percent >= 100.0 {
            Self::Failed
        } else if used_percent >= 70.0 {
            Self::Warning
        } else {
            Self::Good
        }
    }
}

/// Per-time-range adjustment applied before budget arithmetic
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RangeAdjustment {
    /// Signed delta added to the measured SLI
    pub sli_delta: f64,
    /// Scale factor applied to total and downtime minutes
    pub downtime_multiplier: f64,
}

impl Default for RangeAdjustment {
    fn default() -> Self {
        Self {
            sli_delta: 0.0,
            downtime_multiplier: 1.0,
        }
    }
}

impl RangeAdjustment {
    /// Adjustment for a selected range: no SLI delta, minutes scaled by
    /// range-minutes over a day
    pub fn for_range(key: RangeKey) -> Self {
        Self {
            sli_delta: 0.0,
            downtime_multiplier: key.duration().num_minutes() as f64 / DAY_MINUTES,
        }
    }
}

/// Derived error-budget values for one SLO and one time range
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputedSlo {
    /// Health classification
    pub status: SloStatus,
    /// SLI after delta and ceiling clamp
    pub adjusted_sli: f64,
    /// Downtime minutes the budget allows in the adjusted window
    pub allowed_downtime_minutes: f64,
    /// Fraction of the allowed downtime consumed
    pub error_budget_used_rate: f64,
    /// Remaining budget as a percentage, floored at 0
    pub error_budget_remaining_pct: f64,
    /// Overshoot beyond the budget as a percentage, 0 unless breached
    pub error_budget_over_pct: f64,
}

/// Compute the error budget for an SLO under a time-range adjustment.
///
/// Out-of-domain inputs (negative minutes, SLI outside [0,1]) are not
/// validated here; callers own input hygiene. The only guarded case is a
/// zero allowed budget, where the used rate is defined as 0 rather than
/// NaN.
pub fn compute_slo(record: &SloRecord, adjustment: &RangeAdjustment) -> ComputedSlo {
    let adjusted_sli = (record.sli_value + adjustment.sli_delta).clamp(0.0, SLI_CEILING);
    let adjusted_total = record.total_minutes * adjustment.downtime_multiplier;
    let adjusted_downtime = record.actual_downtime_minutes * adjustment.downtime_multiplier;

    let error_budget = 1.0 - adjusted_sli;
    let allowed_downtime_minutes = adjusted_total * error_budget;

    let used_rate = if allowed_downtime_minutes == 0.0 {
        0.0
    } else {
        adjusted_downtime / allowed_downtime_minutes
    };

    ComputedSlo {
        status: SloStatus::from_used_rate(used_rate),
        adjusted_sli,
        allowed_downtime_minutes,
        error_budget_used_rate: used_rate,
        error_budget_remaining_pct: ((1.0 - used_rate) * 100.0).max(0.0),
        error_budget_over_pct: (used_rate * 100.0 - 100.0).max(0.0),
    }
}
