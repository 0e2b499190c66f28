//! Live log feed fan-out
//!
//! Every ingested entry is broadcast to all connected stream subscribers.
//! Slow subscribers fall behind and miss entries; the channel never
//! blocks ingestion.

use pulse_core::LogEntry;
use tokio::sync::broadcast;
use tracing::debug;

/// Broadcast channel capacity per service
const FEED_CAPACITY: usize = 1024;

/// Fan-out point for live log entries
pub struct LiveFeed {
    tx: broadcast::Sender<LogEntry>,
}

impl LiveFeed {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(FEED_CAPACITY);
        Self { tx }
    }

    /// Subscribe to entries ingested after this call
    pub fn subscribe(&self) -> broadcast::Receiver<LogEntry> {
        self.tx.subscribe()
    }

    /// Publish an entry to all current subscribers
    pub fn publish(&self, entry: &LogEntry) {
        let subscribers = self.tx.receiver_count();
        if subscribers > 0 {
            // Send only fails when every receiver is gone; losing the
            // entry is fine then, the feed is fire-and-forget
            let _ = self.tx.send(entry.clone());
            debug!(service = %entry.service, subscribers, "published log entry to live feed");
        }
    }

    /// Number of connected subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for LiveFeed {
    fn default() -> Self {
        Self::new()
    }
}
