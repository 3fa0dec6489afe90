//! Unified error types for all layers of the engine.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

/// Unified error type for the Veris eligibility engine.
///
/// Covers domain, infrastructure, and presentation concerns. Note that a
/// member or coverage being absent is a *successful negative outcome* for
/// the eligibility read path; `NotFound` is reserved for lookups where the
/// caller asked for a specific resource by ID.
#[derive(Error, Debug)]
pub enum VerisError {
    // ============ Domain Errors ============
    /// Resource not found
    #[error("Resource not found: {resource_type} with id {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Conflict error (e.g., duplicate coverage row)
    #[error("Conflict: {0}")]
    Conflict(String),

    // ============ Infrastructure Errors ============
    /// Database error (store unavailable, query failure)
    #[error("Database error: {0}")]
    Database(String),

    /// Redis/Cache error. Never surfaced to callers of the read path;
    /// the engine degrades to the store instead.
    #[error("Cache error: {0}")]
    Cache(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Malformed stored JSON blob. Recovered locally with an empty
    /// default; carried here only for logging context.
    #[error("Decode error in {field}: {message}")]
    Decode { field: &'static str, message: String },

    /// External service error (audit bus, provider network lookup)
    #[error("External service error: {service} - {message}")]
    ExternalService { service: String, message: String },

    /// Timeout error
    #[error("Operation timed out: {0}")]
    Timeout(String),

    // ============ Internal Errors ============
    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl VerisError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::Validation(_) => 400,
            Self::Conflict(_) => 409,
            Self::Timeout(_) => 503,
            Self::ExternalService { .. } => 502,
            Self::Database(_)
            | Self::Cache(_)
            | Self::Configuration(_)
            | Self::Decode { .. }
            | Self::Internal(_)
            | Self::Other(_) => 500,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Cache(_) => "CACHE_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Decode { .. } => "DECODE_ERROR",
            Self::ExternalService { .. } => "EXTERNAL_SERVICE_ERROR",
            Self::Timeout(_) => "TIMEOUT",
            Self::Internal(_) | Self::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// Creates a not found error for a resource.
    #[must_use]
    pub fn not_found<T: ToString>(resource_type: &'static str, id: T) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a conflict error.
    #[must_use]
    pub fn conflict<T: Into<String>>(message: T) -> Self {
        Self::Conflict(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }

    /// Creates an external service error.
    #[must_use]
    pub fn external_service<S: Into<String>, M: Into<String>>(service: S, message: M) -> Self {
        Self::ExternalService {
            service: service.into(),
            message: message.into(),
        }
    }

    /// Checks if this error is retriable by the caller.
    #[must_use]
    pub const fn is_retriable(&self) -> bool {
        matches!(
            self,
            Self::Database(_) | Self::Cache(_) | Self::ExternalService { .. } | Self::Timeout(_)
        )
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for VerisError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => Self::NotFound {
                resource_type: "database_row",
                id: "unknown".to_string(),
            },
            sqlx::Error::Database(db_err) => {
                if let Some(code) = db_err.code() {
                    // PostgreSQL unique violation
                    if code == "23505" {
                        return Self::Conflict(db_err.message().to_string());
                    }
                }
                Self::Database(err.to_string())
            }
            _ => Self::Database(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for VerisError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON serialization error: {}", err))
    }
}

/// Serializable error response for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional field-level errors for validation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
    /// Request trace ID for debugging
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
}

/// Field-level validation error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldError {
    /// Field name
    pub field: String,
    /// Error message
    pub message: String,
    /// Error code
    pub code: String,
}

impl ErrorResponse {
    /// Creates a new error response from a `VerisError`.
    #[must_use]
    pub fn from_error(error: &VerisError) -> Self {
        Self {
            code: error.error_code().to_string(),
            message: error.to_string(),
            details: None,
            trace_id: None,
        }
    }

    /// Sets the trace ID.
    #[must_use]
    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }

    /// Sets field-level validation errors.
    #[must_use]
    pub fn with_details(mut self, details: Vec<FieldError>) -> Self {
        self.details = Some(details);
        self
    }
}

impl From<&VerisError> for ErrorResponse {
    fn from(error: &VerisError) -> Self {
        Self::from_error(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(VerisError::not_found("Coverage", 1).status_code(), 404);
        assert_eq!(VerisError::validation("missing member_id").status_code(), 400);
        assert_eq!(VerisError::conflict("duplicate policy").status_code(), 409);
        assert_eq!(VerisError::Database("down".to_string()).status_code(), 500);
        assert_eq!(VerisError::Cache("down".to_string()).status_code(), 500);
        assert_eq!(VerisError::Timeout("store".to_string()).status_code(), 503);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(VerisError::not_found("Member", "M1").error_code(), "NOT_FOUND");
        assert_eq!(VerisError::validation("bad input").error_code(), "VALIDATION_ERROR");
        assert_eq!(VerisError::Database("db".to_string()).error_code(), "DATABASE_ERROR");
        assert_eq!(
            VerisError::Decode {
                field: "benefit_details",
                message: "trailing comma".to_string()
            }
            .error_code(),
            "DECODE_ERROR"
        );
        assert_eq!(VerisError::internal("oops").error_code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_retriable_errors() {
        assert!(VerisError::Database("connection lost".to_string()).is_retriable());
        assert!(VerisError::Cache("pool exhausted".to_string()).is_retriable());
        assert!(VerisError::Timeout("store round-trip".to_string()).is_retriable());
        assert!(!VerisError::not_found("Coverage", 1).is_retriable());
        assert!(!VerisError::validation("bad input").is_retriable());
        assert!(!VerisError::conflict("dup").is_retriable());
    }

    #[test]
    fn test_error_response_from_error() {
        let err = VerisError::not_found("Member", "M1");
        let response = ErrorResponse::from_error(&err);
        assert_eq!(response.code, "NOT_FOUND");
        assert!(response.message.contains("Member"));
        assert!(response.details.is_none());
        assert!(response.trace_id.is_none());
    }

    #[test]
    fn test_error_response_with_trace_id() {
        let err = VerisError::validation("service_date is required");
        let response = ErrorResponse::from_error(&err).with_trace_id("trace-42");
        assert_eq!(response.trace_id, Some("trace-42".to_string()));
    }

    #[test]
    fn test_error_response_with_details() {
        let err = VerisError::validation("bad input");
        let details = vec![FieldError {
            field: "member_id".to_string(),
            message: "Member ID is required".to_string(),
            code: "REQUIRED".to_string(),
        }];
        let response = ErrorResponse::from_error(&err).with_details(details);
        assert_eq!(response.details.unwrap().len(), 1);
    }
}
