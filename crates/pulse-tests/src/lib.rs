//! Integration tests for the Pulse server
//!
//! This crate exercises the full in-process stack:
//! - HTTP API layer
//! - In-memory store backend with seeded demo data
//! - Analysis routines (grouping, buckets, budgets, ranges)
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p pulse-tests
//! ```
//!
//! # Test Structure
//!
//! - `api_test.rs` - API tests against a seeded in-process router

use std::collections::HashMap;
use std::sync::Arc;

use pulse_api::AppState;
use pulse_core::TelemetryBackend;
use pulse_store::{seed_demo, MemoryBackend, StoreConfig};

/// Build an AppState with seeded demo backends for the given service ids
pub fn seeded_state(service_ids: &[&str]) -> AppState {
    let mut backends: HashMap<String, Arc<dyn TelemetryBackend>> = HashMap::new();
    for id in service_ids {
        let config = StoreConfig::demo(*id, format!("{id} service"), "api");
        let backend = MemoryBackend::new(&config);
        seed_demo(&backend, &config);
        backends.insert(id.to_string(), Arc::new(backend));
    }
    AppState::new(backends)
}
