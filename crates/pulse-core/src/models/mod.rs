//! Shared data models for telemetry backends

mod log;
mod metric;
mod notification;
mod service;
mod slo;
mod trace;

pub use log::*;
pub use metric::*;
pub use notification::*;
pub use service::*;
pub use slo::*;
pub use trace::*;
