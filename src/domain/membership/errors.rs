//! Membership-specific error types.
//!
//! Unknown tier ids and permission names during queries are NOT errors; they
//! degrade to the default tier or to "not granted". These errors cover
//! commands and infrastructure failures.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | NotFoundForUser | 404 |
//! | AlreadyExists | 409 |
//! | InvalidTier | 400 |
//! | Forbidden | 403 |
//! | ValidationFailed | 400 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{DomainError, ErrorCode, UserId, ValidationError};

/// Membership-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MembershipError {
    /// No subscription exists for this user.
    NotFoundForUser(UserId),

    /// User already has a subscription.
    AlreadyExists(UserId),

    /// Tier id is unknown or not configured in the registry.
    InvalidTier(String),

    /// Caller lacks the role required for the operation.
    Forbidden(UserId),

    /// Validation failed.
    ValidationFailed { field: String, message: String },

    /// Infrastructure error.
    Infrastructure(String),
}

impl MembershipError {
    pub fn not_found_for_user(user_id: UserId) -> Self {
        MembershipError::NotFoundForUser(user_id)
    }

    pub fn already_exists(user_id: UserId) -> Self {
        MembershipError::AlreadyExists(user_id)
    }

    pub fn invalid_tier(tier: impl Into<String>) -> Self {
        MembershipError::InvalidTier(tier.into())
    }

    pub fn forbidden(user_id: UserId) -> Self {
        MembershipError::Forbidden(user_id)
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        MembershipError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        MembershipError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            MembershipError::NotFoundForUser(_) => ErrorCode::MembershipNotFound,
            MembershipError::AlreadyExists(_) => ErrorCode::MembershipExists,
            MembershipError::InvalidTier(_) => ErrorCode::InvalidTier,
            MembershipError::Forbidden(_) => ErrorCode::Forbidden,
            MembershipError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            MembershipError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-friendly error message.
    pub fn message(&self) -> String {
        match self {
            MembershipError::NotFoundForUser(user_id) => {
                format!("No membership found for user: {}", user_id)
            }
            MembershipError::AlreadyExists(user_id) => {
                format!("User {} already has a membership", user_id)
            }
            MembershipError::InvalidTier(tier) => format!("Invalid membership tier: {}", tier),
            MembershipError::Forbidden(user_id) => {
                format!("User {} is not allowed to perform this action", user_id)
            }
            MembershipError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            MembershipError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }

    /// Maps a repository failure for `user_id`.
    ///
    /// Store conflicts keep their meaning instead of surfacing as
    /// infrastructure errors: a lost provisioning race is `AlreadyExists`,
    /// an update of a vanished row is `NotFoundForUser`.
    pub fn from_repository(user_id: &UserId, err: DomainError) -> Self {
        match err.code {
            ErrorCode::MembershipExists => MembershipError::AlreadyExists(user_id.clone()),
            ErrorCode::MembershipNotFound => MembershipError::NotFoundForUser(user_id.clone()),
            _ => MembershipError::from(err),
        }
    }
}

impl std::fmt::Display for MembershipError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for MembershipError {}

impl From<DomainError> for MembershipError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::InvalidTier => MembershipError::InvalidTier(err.message),
            ErrorCode::ValidationFailed => MembershipError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => MembershipError::Infrastructure(err.to_string()),
        }
    }
}

impl From<ValidationError> for MembershipError {
    fn from(err: ValidationError) -> Self {
        match &err {
            ValidationError::EmptyField { field } | ValidationError::InvalidFormat { field, .. } => {
                MembershipError::validation(field.clone(), err.to_string())
            }
        }
    }
}

impl From<MembershipError> for DomainError {
    fn from(err: MembershipError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}
