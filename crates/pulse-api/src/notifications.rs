//! Notification configuration store
//!
//! CRUD for channels and rules, kept in API-layer state rather than per
//! backend: notification config spans services. Delivery itself is an
//! external integration and never happens here.

use std::collections::HashMap;

use parking_lot::RwLock;
use pulse_core::{NotificationChannel, NotificationRule};
use tracing::info;

use crate::error::ApiError;

/// In-memory notification configuration
#[derive(Default)]
pub struct NotificationStore {
    channels: RwLock<HashMap<String, NotificationChannel>>,
    rules: RwLock<HashMap<String, NotificationRule>>,
}

impl NotificationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list_channels(&self) -> Vec<NotificationChannel> {
        let mut channels: Vec<_> = self.channels.read().values().cloned().collect();
        channels.sort_by(|a, b| a.id.cmp(&b.id));
        channels
    }

    pub fn create_channel(&self, channel: NotificationChannel) -> Result<NotificationChannel, ApiError> {
        let mut channels = self.channels.write();
        if channels.contains_key(&channel.id) {
            return Err(ApiError::Conflict(format!(
                "Channel already exists: {}",
                channel.id
            )));
        }
        info!(channel = %channel.id, kind = ?channel.kind, "notification channel created");
        channels.insert(channel.id.clone(), channel.clone());
        Ok(channel)
    }

    pub fn delete_channel(&self, channel_id: &str) -> Result<(), ApiError> {
        // Rules pointing at the channel go with it
        let removed = self.channels.write().remove(channel_id);
        if removed.is_none() {
            return Err(ApiError::NotFound(format!(
                "Channel not found: {}",
                channel_id
            )));
        }
        self.rules
            .write()
            .retain(|_, rule| rule.channel_id != channel_id);
        info!(channel = %channel_id, "notification channel deleted");
        Ok(())
    }

    pub fn list_rules(&self) -> Vec<NotificationRule> {
        let mut rules: Vec<_> = self.rules.read().values().cloned().collect();
        rules.sort_by(|a, b| a.id.cmp(&b.id));
        rules
    }

    pub fn create_rule(&self, rule: NotificationRule) -> Result<NotificationRule, ApiError> {
        if !self.channels.read().contains_key(&rule.channel_id) {
            return Err(ApiError::BadRequest(format!(
                "Rule references unknown channel: {}",
                rule.channel_id
            )));
        }
        let mut rules = self.rules.write();
        if rules.contains_key(&rule.id) {
            return Err(ApiError::Conflict(format!("Rule already exists: {}", rule.id)));
        }
        info!(rule = %rule.id, trigger = ?rule.trigger, "notification rule created");
        rules.insert(rule.id.clone(), rule.clone());
        Ok(rule)
    }

    pub fn delete_rule(&self, rule_id: &str) -> Result<(), ApiError> {
        self.rules
            .write()
            .remove(rule_id)
            .map(|_| ())
            .ok_or_else(|| ApiError::NotFound(format!("Rule not found: {}", rule_id)))
    }
}

#[cfg(test)]
mod tests {
    use pulse_core::{ChannelKind, RuleTrigger};

    use super::*;

    fn channel(id: &str) -> NotificationChannel {
        NotificationChannel {
            id: id.to_string(),
            name: "On-call Slack".to_string(),
            kind: ChannelKind::Slack,
            endpoint: "#oncall".to_string(),
            enabled: true,
        }
    }

    fn rule(id: &str, channel_id: &str) -> NotificationRule {
        NotificationRule {
            id: id.to_string(),
            name: "Budget breach".to_string(),
            channel_id: channel_id.to_string(),
            trigger: RuleTrigger::SloBreach,
            threshold: None,
            enabled: true,
        }
    }

    #[test]
    fn rule_requires_existing_channel() {
        let store = NotificationStore::new();
        assert!(store.create_rule(rule("r1", "missing")).is_err());

        store.create_channel(channel("c1")).unwrap();
        assert!(store.create_rule(rule("r1", "c1")).is_ok());
    }

    #[test]
    fn deleting_channel_removes_its_rules() {
        let store = NotificationStore::new();
        store.create_channel(channel("c1")).unwrap();
        store.create_rule(rule("r1", "c1")).unwrap();

        store.delete_channel("c1").unwrap();
        assert!(store.list_rules().is_empty());
    }

    #[test]
    fn duplicate_ids_conflict() {
        let store = NotificationStore::new();
        store.create_channel(channel("c1")).unwrap();
        assert!(store.create_channel(channel("c1")).is_err());
    }
}
