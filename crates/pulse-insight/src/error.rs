//! Error types for analysis routines

use thiserror::Error;

/// Result type alias for analysis operations
pub type InsightResult<T> = Result<T, InsightError>;

/// Errors from analysis routines
#[derive(Debug, Error)]
pub enum InsightError {
    /// A symbolic time-range key outside the known set
    #[error("Unknown time-range key: {0:?}")]
    UnknownRangeKey(String),
}
