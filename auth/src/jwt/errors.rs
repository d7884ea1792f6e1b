use thiserror::Error;

/// Error type for token operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Failed to decode token: {0}")]
    DecodingFailed(String),

    #[error("Token is expired")]
    TokenExpired,

    #[error("Token was issued for app {actual}, expected app {expected}")]
    AppMismatch { expected: i32, actual: i32 },

    #[error("Token TTL out of range: {0} seconds")]
    InvalidTtl(i64),
}
