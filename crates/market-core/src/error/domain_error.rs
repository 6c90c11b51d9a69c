//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Snowflake),

    #[error("Product not found: {0}")]
    ProductNotFound(Snowflake),

    #[error("Message not found: {0}")]
    MessageNotFound(Snowflake),

    #[error("Notification not found: {0}")]
    NotificationNotFound(Snowflake),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Price must be positive, got {0}")]
    InvalidPrice(f64),

    #[error("Content must not be empty")]
    EmptyContent,

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Admin role required")]
    NotAdmin,

    #[error("Only the listing owner may do this")]
    NotOwner,

    #[error("Only the recipient may do this")]
    NotRecipient,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for caller-facing reporting
    pub fn code(&self) -> &'static str {
        match self {
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::ProductNotFound(_) => "UNKNOWN_PRODUCT",
            Self::MessageNotFound(_) => "UNKNOWN_MESSAGE",
            Self::NotificationNotFound(_) => "UNKNOWN_NOTIFICATION",

            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidPrice(_) => "INVALID_PRICE",
            Self::EmptyContent => "EMPTY_CONTENT",

            Self::NotAdmin => "MISSING_ADMIN_ROLE",
            Self::NotOwner => "NOT_LISTING_OWNER",
            Self::NotRecipient => "NOT_RECIPIENT",

            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",

            Self::StorageError(_) => "STORAGE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::ProductNotFound(_)
                | Self::MessageNotFound(_)
                | Self::NotificationNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_) | Self::InvalidEmail | Self::InvalidPrice(_) | Self::EmptyContent
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::NotAdmin | Self::NotOwner | Self::NotRecipient)
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::EmailAlreadyExists)
    }
}
