//! pulse-insight - Pure analysis routines for Pulse dashboards
//!
//! The stateless computations behind the dashboard views: log template
//! grouping, waterfall duration buckets, SLO error budgets, and symbolic
//! time-range resolution. Everything here is a single-pass function over
//! plain data; the only impurity is the `now()` default in
//! [`timerange::resolve`].
//!
//! # Quick Start
//!
//! ```rust
//! use pulse_insight::{normalize_message, DurationBucket};
//!
//! // Messages differing only in ids share one template key
//! assert_eq!(normalize_message("User 42 not found"), "user not found");
//! assert_eq!(normalize_message("User 17 not found"), "user not found");
//!
//! // A span at 90% of the batch maximum lands in the slowest bucket
//! let bucket = DurationBucket::from_ratio(0.9);
//! assert_eq!(bucket.label(), "Very Slow");
//! assert_eq!(bucket.color(), "#f43f5e");
//! ```

pub mod bucket;
pub mod budget;
pub mod error;
pub mod group;
pub mod normalize;
pub mod timerange;

pub use bucket::{bucket_spans, duration_ratio, DurationBucket};
pub use budget::{compute_slo, ComputedSlo, RangeAdjustment, SloStatus};
pub use error::{InsightError, InsightResult};
pub use group::{group_logs, LogGroup, DEFAULT_MAX_GROUPS};
pub use normalize::{normalize_message, MAX_KEY_LEN, OTHER_KEY};
pub use timerange::{
    resolve, resolve_at, RangeKey, ResolvedRange, CHART_RANGE_KEYS, LOG_RANGE_KEYS,
};
