//! pulse-store - In-memory telemetry store backend
//!
//! Implements [`pulse_core::TelemetryBackend`] over parking_lot-guarded
//! in-memory tables, with a broadcast live log feed and deterministic
//! demo seeding for local development.

pub mod backend;
pub mod config;
pub mod live;
pub mod seed;

pub use backend::MemoryBackend;
pub use config::{SeedConfig, StoreConfig};
pub use live::LiveFeed;
pub use seed::seed_demo;
