//! Symbolic time-range resolution
//!
//! Maps dashboard range keys like `"1h"` or `"2w"` to an absolute
//! `[start, end]` window ending now, plus a fixed chart sampling interval.
//! The interval is display metadata only; start/end correctness never
//! depends on it.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::InsightError;

/// A symbolic relative time range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RangeKey {
    Min15,
    Min30,
    Min45,
    OneHour,
    ThreeHours,
    SixHours,
    TwelveHours,
    OneDay,
    OneWeek,
    TwoWeeks,
    OneMonth,
}

/// Every key, including the sub-hour granularity used by the log views
pub const LOG_RANGE_KEYS: [RangeKey; 11] = [
    RangeKey::Min15,
    RangeKey::Min30,
    RangeKey::Min45,
    RangeKey::OneHour,
    RangeKey::ThreeHours,
    RangeKey::SixHours,
    RangeKey::TwelveHours,
    RangeKey::OneDay,
    RangeKey::OneWeek,
    RangeKey::TwoWeeks,
    RangeKey::OneMonth,
];

/// The coarser set accepted by metric charts and SLO views
pub const CHART_RANGE_KEYS: [RangeKey; 8] = [
    RangeKey::OneHour,
    RangeKey::ThreeHours,
    RangeKey::SixHours,
    RangeKey::TwelveHours,
    RangeKey::OneDay,
    RangeKey::OneWeek,
    RangeKey::TwoWeeks,
    RangeKey::OneMonth,
];

impl RangeKey {
    /// Wire token for this key
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Min15 => "15min",
            Self::Min30 => "30min",
            Self::Min45 => "45min",
            Self::OneHour => "1h",
            Self::ThreeHours => "3h",
            Self::SixHours => "6h",
            Self::TwelveHours => "12h",
            Self::OneDay => "1d",
            Self::OneWeek => "1w",
            Self::TwoWeeks => "2w",
            Self::OneMonth => "1M",
        }
    }

    /// Absolute length of this range. `1M` is a fixed 30 days.
    pub fn duration(&self) -> Duration {
        match self {
            Self::Min15 => Duration::minutes(15),
            Self::Min30 => Duration::minutes(30),
            Self::Min45 => Duration::minutes(45),
            Self::OneHour => Duration::hours(1),
            Self::ThreeHours => Duration::hours(3),
            Self::SixHours => Duration::hours(6),
            Self::TwelveHours => Duration::hours(12),
            Self::OneDay => Duration::days(1),
            Self::OneWeek => Duration::weeks(1),
            Self::TwoWeeks => Duration::weeks(2),
            Self::OneMonth => Duration::days(30),
        }
    }

    /// Chart sampling interval for this range, from the fixed lookup table
    pub fn interval(&self) -> &'static str {
        match self {
            Self::Min15 => "1m",
            Self::Min30 => "1m",
            Self::Min45 => "2m",
            Self::OneHour => "5m",
            Self::ThreeHours => "10m",
            Self::SixHours => "20m",
            Self::TwelveHours => "1h",
            Self::OneDay => "2h",
            Self::OneWeek => "12h",
            Self::TwoWeeks => "1d",
            Self::OneMonth => "1d",
        }
    }

    /// True if this key belongs to the coarser chart/SLO set
    pub fn is_chart_key(&self) -> bool {
        CHART_RANGE_KEYS.contains(self)
    }
}

impl FromStr for RangeKey {
    type Err = InsightError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LOG_RANGE_KEYS
            .iter()
            .find(|key| key.as_str() == s)
            .copied()
            .ok_or_else(|| InsightError::UnknownRangeKey(s.to_string()))
    }
}

impl fmt::Display for RangeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for RangeKey {
    type Error = InsightError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RangeKey> for String {
    fn from(key: RangeKey) -> Self {
        key.as_str().to_string()
    }
}

/// An absolute time window with its chart sampling interval
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ResolvedRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub interval: &'static str,
}

/// Resolve a key against the current instant
pub fn resolve(key: RangeKey) -> ResolvedRange {
    resolve_at(key, Utc::now())
}

/// Resolve a key with an explicit end instant
pub fn resolve_at(key: RangeKey, end: DateTime<Utc>) -> ResolvedRange {
    ResolvedRange {
        start: end - key.duration(),
        end,
        interval: key.interval(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn one_hour_round_trip() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let range = resolve_at(RangeKey::OneHour, now);
        assert_eq!(range.end, now);
        assert_eq!(range.start, Utc.with_ymd_and_hms(2024, 1, 1, 11, 0, 0).unwrap());
        assert_eq!(range.interval, "5m");
    }

    #[test]
    fn window_length_matches_key_duration() {
        let now = Utc::now();
        for key in LOG_RANGE_KEYS {
            let range = resolve_at(key, now);
            assert_eq!(range.end - range.start, key.duration(), "key {key}");
        }
    }

    #[test]
    fn fixed_interval_table() {
        assert_eq!(RangeKey::OneHour.interval(), "5m");
        assert_eq!(RangeKey::OneDay.interval(), "2h");
        assert_eq!(RangeKey::TwoWeeks.interval(), "1d");
    }

    #[test]
    fn parse_accepts_every_known_token() {
        for key in LOG_RANGE_KEYS {
            assert_eq!(key.as_str().parse::<RangeKey>().unwrap(), key);
        }
    }

    #[test]
    fn parse_rejects_unknown_tokens() {
        for bad in ["", "5m", "1y", "2d", "1month", "1H"] {
            assert!(bad.parse::<RangeKey>().is_err(), "token {bad:?}");
        }
    }

    #[test]
    fn month_token_is_case_sensitive() {
        // "1M" is a month; a lowercase "1m" would be a minute and is not a key
        assert_eq!("1M".parse::<RangeKey>().unwrap(), RangeKey::OneMonth);
        assert!("1m".parse::<RangeKey>().is_err());
    }

    #[test]
    fn chart_set_excludes_sub_hour_keys() {
        assert!(!RangeKey::Min15.is_chart_key());
        assert!(!RangeKey::Min45.is_chart_key());
        assert!(RangeKey::OneHour.is_chart_key());
        assert!(RangeKey::OneMonth.is_chart_key());
    }
}
