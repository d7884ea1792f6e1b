use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// The stored hash could not be parsed. A wrong password is never reported this way.
    #[error("Stored password hash is corrupt: {0}")]
    CorruptHash(String),
}
