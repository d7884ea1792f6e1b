use thiserror::Error;

use crate::domain::auth::models::AppId;
use crate::domain::auth::models::UserId;

/// Error for request shape violations, one variant per offending field.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("email is required")]
    EmailRequired,

    #[error("password is required")]
    PasswordRequired,

    #[error("password must be at least {min} characters long")]
    PasswordTooShort { min: usize },

    #[error("app_id is required")]
    AppIdRequired,

    #[error("user_id is required")]
    UserIdRequired,

    #[error("email is invalid: {0}")]
    InvalidEmail(#[from] EmailError),
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Failures reported by the storage ports.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    /// The unique constraint on email rejected an insert.
    #[error("Email already registered: {0}")]
    DuplicateEmail(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Top-level error for all auth engine operations
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] ValidationError),

    // Domain-level errors
    /// Unknown email and wrong password are deliberately the same error.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User already exists: {0}")]
    UserAlreadyExists(String),

    #[error("User not found: {0}")]
    UserNotFound(UserId),

    #[error("App not found: {0}")]
    AppNotFound(AppId),

    // Infrastructure errors
    #[error("Stored credential for user {user_id} is corrupt: {reason}")]
    CorruptCredential { user_id: UserId, reason: String },

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Token error: {0}")]
    Token(#[from] auth::JwtError),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<StorageError> for AuthError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::DuplicateEmail(email) => AuthError::UserAlreadyExists(email),
            StorageError::Unavailable(reason) => AuthError::StorageUnavailable(reason),
        }
    }
}

impl From<EmailError> for AuthError {
    fn from(err: EmailError) -> Self {
        AuthError::InvalidArgument(ValidationError::InvalidEmail(err))
    }
}
