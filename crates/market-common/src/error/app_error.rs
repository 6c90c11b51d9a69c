//! Application error types
//!
//! Unified error handling above the domain layer. The consuming UI is
//! expected to translate these into a transient error banner; nothing in
//! the core retries on its own.

use market_core::DomainError;
use std::fmt;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Authentication errors
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Insufficient permissions")]
    InsufficientPermissions,

    // Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    // Resource errors
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Resource already exists: {0}")]
    AlreadyExists(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    // Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    // Internal errors
    #[error("Internal error")]
    Internal(#[source] anyhow::Error),

    // Domain errors
    #[error(transparent)]
    Domain(#[from] DomainError),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Get error code for caller-facing reporting
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InsufficientPermissions => "INSUFFICIENT_PERMISSIONS",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::AlreadyExists(_) => "ALREADY_EXISTS",
            Self::Conflict(_) => "CONFLICT",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Domain(e) => e.code(),
        }
    }

    /// Check if the caller did something wrong (as opposed to the system)
    #[must_use]
    pub fn is_caller_error(&self) -> bool {
        match self {
            Self::InvalidCredentials
            | Self::InsufficientPermissions
            | Self::Validation(_)
            | Self::NotFound(_)
            | Self::AlreadyExists(_)
            | Self::Conflict(_) => true,
            Self::Storage(_) | Self::Internal(_) | Self::Config(_) => false,
            Self::Domain(e) => !matches!(
                e,
                DomainError::StorageError(_) | DomainError::InternalError(_)
            ),
        }
    }

    /// Create a not found error for a resource
    #[must_use]
    pub fn not_found(resource: impl fmt::Display) -> Self {
        Self::NotFound(resource.to_string())
    }

    /// Create a validation error
    #[must_use]
    pub fn validation(msg: impl fmt::Display) -> Self {
        Self::Validation(msg.to_string())
    }

    /// Create an internal error from any error
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use market_core::Snowflake;

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::InvalidCredentials.error_code(), "INVALID_CREDENTIALS");
        assert_eq!(AppError::not_found("user 123").error_code(), "NOT_FOUND");
        assert_eq!(
            AppError::Domain(DomainError::NotAdmin).error_code(),
            "MISSING_ADMIN_ROLE"
        );
    }

    #[test]
    fn test_caller_vs_system_errors() {
        assert!(AppError::InvalidCredentials.is_caller_error());
        assert!(AppError::Domain(DomainError::ProductNotFound(Snowflake::new(1))).is_caller_error());
        assert!(!AppError::Storage("disk gone".to_string()).is_caller_error());
        assert!(!AppError::Domain(DomainError::StorageError("x".to_string())).is_caller_error());
    }

    #[test]
    fn test_helper_constructors() {
        let err = AppError::validation("email is required");
        assert_eq!(err.to_string(), "Validation error: email is required");

        let err = AppError::not_found("user 123");
        assert_eq!(err.to_string(), "Resource not found: user 123");
    }
}
