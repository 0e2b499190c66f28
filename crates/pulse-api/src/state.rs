//! Application state for the Pulse API

use std::collections::HashMap;
use std::sync::Arc;

use pulse_core::TelemetryBackend;

use crate::error::ApiError;
use crate::notifications::NotificationStore;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Map of service ID to backend implementation
    backends: Arc<HashMap<String, Arc<dyn TelemetryBackend>>>,
    /// Notification channel/rule configuration
    pub notifications: Arc<NotificationStore>,
}

impl AppState {
    /// Create a new AppState with the given backends
    pub fn new(backends: HashMap<String, Arc<dyn TelemetryBackend>>) -> Self {
        Self {
            backends: Arc::new(backends),
            notifications: Arc::new(NotificationStore::new()),
        }
    }

    /// Create AppState from a single backend (for simple single-service servers)
    pub fn single(id: impl Into<String>, backend: Arc<dyn TelemetryBackend>) -> Self {
        let mut backends = HashMap::new();
        backends.insert(id.into(), backend);
        Self::new(backends)
    }

    /// Get a backend by service ID
    pub fn get_backend(&self, service_id: &str) -> Result<&Arc<dyn TelemetryBackend>, ApiError> {
        self.backends
            .get(service_id)
            .ok_or_else(|| ApiError::NotFound(format!("Service not found: {}", service_id)))
    }

    /// All backends, for listing endpoints
    pub fn backends(&self) -> impl Iterator<Item = &Arc<dyn TelemetryBackend>> {
        self.backends.values()
    }
}
