use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;

/// Claims carried by an app-scoped access token.
///
/// Field names follow RFC 7519 where a registered claim exists (`sub`, `iat`, `exp`).
/// `app` binds the token to the client application whose secret signed it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppClaims {
    /// User identifier
    pub sub: i64,

    /// App identifier
    pub app: i32,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl AppClaims {
    /// Build claims for a user logging into an app.
    ///
    /// # Arguments
    /// * `user_id` - Authenticated user
    /// * `app_id` - App the token is scoped to
    /// * `issued_at` - Issuance instant
    /// * `ttl` - Lifetime of the token
    ///
    /// # Errors
    /// * `InvalidTtl` - `issued_at + ttl` is past the last representable instant
    pub fn for_app(
        user_id: i64,
        app_id: i32,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Self, JwtError> {
        let expiration = issued_at
            .checked_add_signed(ttl)
            .ok_or(JwtError::InvalidTtl(ttl.num_seconds()))?;

        Ok(Self {
            sub: user_id,
            app: app_id,
            iat: issued_at.timestamp(),
            exp: expiration.timestamp(),
        })
    }

    /// Check if the token is expired at `current_timestamp`.
    ///
    /// The expiry instant itself is already invalid.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp <= current_timestamp
    }
}
