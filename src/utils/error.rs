//! Error handling for the health engine
//!
//! One error type covers the whole crate. Only two kinds ever escape a
//! run: configuration-time errors from setup APIs and cooperative
//! cancellation; every other probe-level problem is captured into the
//! report so a misbehaving probe degrades the aggregate status instead of
//! crashing the health endpoint.

use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

/// Result type alias for the health engine
pub type Result<T> = std::result::Result<T, HealthError>;

/// Main error type for the health engine
#[derive(Error, Debug)]
pub enum HealthError {
    /// Two or more probes registered under the same case-insensitive name;
    /// detected when the engine is constructed
    #[error("duplicate health checks were registered with the name(s): {}", .0.join(", "))]
    DuplicateRegistrations(Vec<String>),

    /// Malformed registration passed to `add`
    #[error("invalid registration: {0}")]
    InvalidRegistration(String),

    /// The run's cancellation signal was triggered; the only probe-level
    /// condition that propagates out of a run
    #[error("health check run was cancelled")]
    Cancelled,

    /// Unexpected failure raised by a probe; captured into the report,
    /// never propagated out of a run
    #[error(transparent)]
    Check(#[from] anyhow::Error),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl HealthError {
    /// Whether this is the cooperative-cancellation kind
    ///
    /// The engine propagates cancellation and captures everything else.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, HealthError::Cancelled)
    }

    /// Shorthand for a probe failure from a plain message
    pub fn check<S: Into<String>>(message: S) -> Self {
        Self::Check(anyhow::anyhow!(message.into()))
    }

    /// Shorthand for a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }
}

impl ResponseError for HealthError {
    fn error_response(&self) -> HttpResponse {
        let (status_code, error_code) = match self {
            HealthError::Cancelled => (
                actix_web::http::StatusCode::SERVICE_UNAVAILABLE,
                "RUN_CANCELLED",
            ),
            HealthError::InvalidRegistration(_) => (
                actix_web::http::StatusCode::BAD_REQUEST,
                "INVALID_REGISTRATION",
            ),
            HealthError::DuplicateRegistrations(_) => (
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "DUPLICATE_REGISTRATIONS",
            ),
            _ => (
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
            ),
        };

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: error_code.to_string(),
                message: self.to_string(),
                timestamp: chrono::Utc::now().timestamp(),
            },
        };

        HttpResponse::build(status_code).json(error_response)
    }
}

/// Standard error response format
#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail structure
#[derive(serde::Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub timestamp: i64,
}
