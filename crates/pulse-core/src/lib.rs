//! pulse-core - Core traits and types for Pulse telemetry backends
//!
//! This crate provides the fundamental abstractions that allow different
//! telemetry sources (in-memory stores, collectors, databases) to serve
//! the Pulse API.

pub mod backend;
pub mod error;
pub mod models;

pub use backend::TelemetryBackend;
pub use error::{BackendError, BackendResult};
pub use models::*;
