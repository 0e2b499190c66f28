//! Log grouping by normalized template key
//!
//! Buckets entries by their normalized message key, ranks groups by size,
//! and returns the top N. Recomputed from scratch on every input change;
//! nothing here is stateful.

use std::collections::HashMap;

use pulse_core::LogEntry;
use serde::Serialize;

use crate::normalize::normalize_message;

/// Default maximum number of groups returned
pub const DEFAULT_MAX_GROUPS: usize = 8;

/// A group of log entries sharing one normalized key
#[derive(Debug, Clone, Serialize)]
pub struct LogGroup {
    /// Normalized template key
    pub key: String,
    /// Representative raw message: the first entry inserted under this key
    pub title: String,
    /// Member entries in insertion order
    pub items: Vec<LogEntry>,
}

/// Group entries by normalized message key, largest group first.
///
/// At most `max_groups` groups are returned; entries beyond the cut are
/// not dropped from their groups, the whole groups are simply not
/// returned. Ties in group size keep the order the keys were first
/// encountered. Empty input yields empty output.
pub fn group_logs(entries: &[LogEntry], max_groups: usize) -> Vec<LogGroup> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<LogGroup> = Vec::new();

    for entry in entries {
        let key = normalize_message(&entry.message);
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            let title = if entry.message.is_empty() {
                key.clone()
            } else {
                entry.message.clone()
            };
            groups.push(LogGroup {
                key,
                title,
                items: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].items.push(entry.clone());
    }

    // Stable sort keeps first-encounter order for equal-sized groups
    groups.sort_by(|a, b| b.items.len().cmp(&a.items.len()));
    groups.truncate(max_groups);
    groups
}
