//! HTTP request handlers for the Pulse API
//!
//! These handlers use the TelemetryBackend trait and are backend-agnostic.

pub mod logs;
pub mod metrics;
pub mod notifications;
pub mod services;
pub mod slos;
pub mod traces;
