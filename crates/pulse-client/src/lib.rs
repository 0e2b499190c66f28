//! Pulse Client Library
//!
//! Provides a typed HTTP client for the Pulse APM API.
//!
//! # Example
//!
//! ```rust,no_run
//! use pulse_client::{LogQuery, PulseClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = PulseClient::new("http://localhost:9200")?;
//!
//!     // List monitored services
//!     let services = client.list_services().await?;
//!
//!     // Last 20 error logs of the checkout service
//!     let query = LogQuery {
//!         level: Some("error".to_string()),
//!         tail: Some(20),
//!         ..Default::default()
//!     };
//!     let errors = client.get_logs("checkout", &query).await?;
//!
//!     // Error-budget status over the last day
//!     let status = client.get_slo_status("checkout", "checkout-availability", "1d").await?;
//!     println!("{} budget used: {:.0}%", services.total_count, status.error_budget_used_rate * 100.0);
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod types;

pub use client::PulseClient;
pub use error::{PulseClientError, Result};
pub use types::*;
