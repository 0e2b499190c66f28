//! pulse-api - Pulse REST API layer with generic handlers
//!
//! This crate provides the HTTP API layer that uses the TelemetryBackend
//! trait to serve APM endpoints. It is backend-agnostic.
//!
//! # Usage
//!
//! ```ignore
//! use pulse_api::{create_router, AppState};
//! use pulse_store::MemoryBackend;
//!
//! let backend = Arc::new(MemoryBackend::new(&config));
//! let state = AppState::single("checkout", backend);
//! let router = create_router(state);
//! ```

pub mod error;
pub mod handlers;
pub mod notifications;
pub mod state;

pub use error::ApiError;
pub use notifications::NotificationStore;
pub use state::AppState;

use axum::routing::{delete, get};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the Pulse REST API router with the given application state
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(|| async { "OK" }))
        // Service routes
        .route("/apm/v1/services", get(handlers::services::list_services))
        .route(
            "/apm/v1/services/{service_id}",
            get(handlers::services::get_service),
        )
        // Log routes
        .route(
            "/apm/v1/services/{service_id}/logs",
            get(handlers::logs::get_logs).post(handlers::logs::ingest_log),
        )
        .route(
            "/apm/v1/services/{service_id}/logs/groups",
            get(handlers::logs::get_log_groups),
        )
        .route(
            "/apm/v1/services/{service_id}/logs/stream",
            get(handlers::logs::stream_logs),
        )
        // Trace routes
        .route(
            "/apm/v1/services/{service_id}/traces",
            get(handlers::traces::list_traces),
        )
        .route(
            "/apm/v1/services/{service_id}/traces/{trace_id}",
            get(handlers::traces::get_trace),
        )
        .route(
            "/apm/v1/services/{service_id}/traces/{trace_id}/waterfall",
            get(handlers::traces::get_waterfall),
        )
        // Metric routes
        .route(
            "/apm/v1/services/{service_id}/metrics/{metric}",
            get(handlers::metrics::get_metric_series),
        )
        // SLO routes
        .route(
            "/apm/v1/services/{service_id}/slos",
            get(handlers::slos::list_slos).post(handlers::slos::create_slo),
        )
        .route(
            "/apm/v1/services/{service_id}/slos/{slo_id}",
            get(handlers::slos::get_slo)
                .put(handlers::slos::update_slo)
                .delete(handlers::slos::delete_slo),
        )
        .route(
            "/apm/v1/services/{service_id}/slos/{slo_id}/status",
            get(handlers::slos::get_slo_status),
        )
        // Notification configuration routes
        .route(
            "/apm/v1/notifications/channels",
            get(handlers::notifications::list_channels)
                .post(handlers::notifications::create_channel),
        )
        .route(
            "/apm/v1/notifications/channels/{channel_id}",
            delete(handlers::notifications::delete_channel),
        )
        .route(
            "/apm/v1/notifications/rules",
            get(handlers::notifications::list_rules).post(handlers::notifications::create_rule),
        )
        .route(
            "/apm/v1/notifications/rules/{rule_id}",
            delete(handlers::notifications::delete_rule),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
