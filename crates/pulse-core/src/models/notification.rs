//! Notification configuration models
//!
//! Configuration only: channels describe where alerts go, rules describe
//! when. Actual delivery is an external integration and not modeled here.

use serde::{Deserialize, Serialize};

/// Kind of notification channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelKind {
    Slack,
    Email,
    Webhook,
}

/// A configured notification destination
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationChannel {
    /// Unique identifier
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Channel kind
    pub kind: ChannelKind,
    /// Destination (webhook URL, email address, Slack channel)
    pub endpoint: String,
    /// Whether the channel is active
    pub enabled: bool,
}

/// Condition a notification rule fires on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleTrigger {
    /// An SLO's error budget is exhausted
    SloBreach,
    /// Error-log rate exceeds the threshold
    ErrorSpike,
    /// A service stops reporting
    ServiceDown,
}

/// A configured alerting rule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationRule {
    /// Unique identifier
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Channel this rule notifies
    pub channel_id: String,
    /// Condition the rule fires on
    pub trigger: RuleTrigger,
    /// Trigger threshold, meaning depends on the trigger kind
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
    /// Whether the rule is active
    pub enabled: bool,
}
