//! Domain errors - error types for the domain layer

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Post not found: {0}")]
    PostNotFound(i64),

    #[error("User not found: {0}")]
    UserNotFound(i64),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Title must be 1-200 characters")]
    InvalidTitle,

    #[error("Post body must not be empty")]
    EmptyBody,

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Not the post creator")]
    NotPostCreator,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailTaken,

    #[error("Username already in use")]
    UsernameTaken,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::PostNotFound(_) => "UNKNOWN_POST",
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidTitle => "INVALID_TITLE",
            Self::EmptyBody => "EMPTY_BODY",
            Self::NotPostCreator => "NOT_POST_CREATOR",
            Self::EmailTaken => "EMAIL_TAKEN",
            Self::UsernameTaken => "USERNAME_TAKEN",
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::CacheError(_) => "CACHE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::PostNotFound(_) | Self::UserNotFound(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_) | Self::InvalidTitle | Self::EmptyBody
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::NotPostCreator)
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::EmailTaken | Self::UsernameTaken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(DomainError::PostNotFound(1).code(), "UNKNOWN_POST");
        assert_eq!(DomainError::EmailTaken.code(), "EMAIL_TAKEN");
        assert_eq!(DomainError::NotPostCreator.code(), "NOT_POST_CREATOR");
    }

    #[test]
    fn test_classification() {
        assert!(DomainError::PostNotFound(1).is_not_found());
        assert!(DomainError::NotPostCreator.is_authorization());
        assert!(DomainError::EmailTaken.is_conflict());
        assert!(DomainError::InvalidTitle.is_validation());
        assert!(!DomainError::DatabaseError("x".to_string()).is_not_found());
    }

    #[test]
    fn test_error_display() {
        let err = DomainError::PostNotFound(123);
        assert_eq!(err.to_string(), "Post not found: 123");
    }
}
