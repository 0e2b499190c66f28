//! Common error types for telemetry backends

use thiserror::Error;

/// Result type for backend operations
pub type BackendResult<T> = Result<T, BackendError>;

/// Errors that can occur in telemetry backends
#[derive(Debug, Error)]
pub enum BackendError {
    /// Service not found
    #[error("Service not found: {0}")]
    ServiceNotFound(String),

    /// Trace not found
    #[error("Trace not found: {0}")]
    TraceNotFound(String),

    /// SLO not found
    #[error("SLO not found: {0}")]
    SloNotFound(String),

    /// SLO already exists (create with a duplicate id)
    #[error("SLO already exists: {0}")]
    SloExists(String),

    /// Operation not supported by this backend
    #[error("Operation not supported: {0}")]
    NotSupported(String),

    /// Invalid parameter or request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl BackendError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            BackendError::ServiceNotFound(_) => 404,
            BackendError::TraceNotFound(_) => 404,
            BackendError::SloNotFound(_) => 404,
            BackendError::SloExists(_) => 409,
            BackendError::NotSupported(_) => 501,
            BackendError::InvalidRequest(_) => 400,
            BackendError::Internal(_) => 500,
        }
    }
}
