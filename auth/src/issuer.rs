use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::jwt::AppClaims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;

/// Issues and verifies app-scoped access tokens.
///
/// Every token is signed with the secret of the app it is issued for, so a
/// token minted for one app never verifies under another app's secret.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenIssuer;

impl TokenIssuer {
    pub fn new() -> Self {
        Self
    }

    /// Issue a token for `user_id` scoped to `app_id`, valid for `ttl` from now.
    ///
    /// Claims carry whole seconds, so `ttl` must be at least one second.
    ///
    /// # Errors
    /// * `InvalidTtl` - `ttl` is under one second or the expiry is unrepresentable
    /// * `EncodingFailed` - Token signing failed
    pub fn issue(
        &self,
        user_id: i64,
        app_id: i32,
        secret: &[u8],
        ttl: Duration,
    ) -> Result<String, JwtError> {
        self.issue_at(user_id, app_id, secret, ttl, Utc::now())
    }

    /// Issue a token as if the current time were `now`.
    pub fn issue_at(
        &self,
        user_id: i64,
        app_id: i32,
        secret: &[u8],
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<String, JwtError> {
        if ttl < Duration::seconds(1) {
            return Err(JwtError::InvalidTtl(ttl.num_seconds()));
        }

        let claims = AppClaims::for_app(user_id, app_id, now, ttl)?;
        JwtHandler::new(secret).encode(&claims)
    }

    /// Verify a token presented to `app_id`, signed with that app's `secret`.
    ///
    /// # Errors
    /// * `DecodingFailed` - Malformed token or signature mismatch
    /// * `AppMismatch` - Token was issued for a different app
    /// * `TokenExpired` - `exp` is at or before the current time
    pub fn verify(&self, token: &str, app_id: i32, secret: &[u8]) -> Result<AppClaims, JwtError> {
        self.verify_at(token, app_id, secret, Utc::now())
    }

    /// Verify a token as if the current time were `now`.
    pub fn verify_at(
        &self,
        token: &str,
        app_id: i32,
        secret: &[u8],
        now: DateTime<Utc>,
    ) -> Result<AppClaims, JwtError> {
        let claims: AppClaims = JwtHandler::new(secret).decode(token)?;

        if claims.app != app_id {
            return Err(JwtError::AppMismatch {
                expected: app_id,
                actual: claims.app,
            });
        }

        if claims.is_expired(now.timestamp()) {
            return Err(JwtError::TokenExpired);
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    const SECRET_A: &[u8] = b"app_a_secret_at_least_32_bytes_long!";
    const SECRET_B: &[u8] = b"app_b_secret_at_least_32_bytes_long!";

    fn issued_at() -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn test_issue_and_verify() {
        let issuer = TokenIssuer::new();

        let token = issuer
            .issue(1, 7, SECRET_A, Duration::hours(1))
            .expect("Failed to issue token");
        let claims = issuer
            .verify(&token, 7, SECRET_A)
            .expect("Failed to verify token");

        assert_eq!(claims.sub, 1);
        assert_eq!(claims.app, 7);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_verify_with_other_app_secret() {
        let issuer = TokenIssuer::new();
        let token = issuer.issue(1, 7, SECRET_A, Duration::hours(1)).unwrap();

        let result = issuer.verify(&token, 7, SECRET_B);
        assert!(matches!(result, Err(JwtError::DecodingFailed(_))));
    }

    #[test]
    fn test_verify_for_other_app_id() {
        let issuer = TokenIssuer::new();
        let token = issuer.issue(1, 7, SECRET_A, Duration::hours(1)).unwrap();

        let result = issuer.verify(&token, 8, SECRET_A);
        assert_eq!(
            result,
            Err(JwtError::AppMismatch {
                expected: 8,
                actual: 7
            })
        );
    }

    #[test]
    fn test_expiry_boundary() {
        let issuer = TokenIssuer::new();
        let ttl = Duration::minutes(15);
        let token = issuer
            .issue_at(1, 7, SECRET_A, ttl, issued_at())
            .unwrap();

        let just_before = issued_at() + ttl - Duration::seconds(1);
        let at_expiry = issued_at() + ttl;
        let just_after = issued_at() + ttl + Duration::seconds(1);

        assert!(issuer.verify_at(&token, 7, SECRET_A, just_before).is_ok());
        assert_eq!(
            issuer.verify_at(&token, 7, SECRET_A, at_expiry),
            Err(JwtError::TokenExpired)
        );
        assert_eq!(
            issuer.verify_at(&token, 7, SECRET_A, just_after),
            Err(JwtError::TokenExpired)
        );
    }

    #[test]
    fn test_non_positive_ttl_rejected() {
        let issuer = TokenIssuer::new();

        assert_eq!(
            issuer.issue(1, 7, SECRET_A, Duration::zero()),
            Err(JwtError::InvalidTtl(0))
        );
        assert_eq!(
            issuer.issue(1, 7, SECRET_A, Duration::seconds(-30)),
            Err(JwtError::InvalidTtl(-30))
        );
    }

    #[test]
    fn test_sub_second_ttl_rejected() {
        let issuer = TokenIssuer::new();

        assert_eq!(
            issuer.issue(1, 7, SECRET_A, Duration::milliseconds(500)),
            Err(JwtError::InvalidTtl(0))
        );
        assert!(issuer.issue(1, 7, SECRET_A, Duration::seconds(1)).is_ok());
    }

    #[test]
    fn test_ttl_past_max_date_is_an_error() {
        let issuer = TokenIssuer::new();
        let ttl = Duration::seconds(100_000_000_000_000);

        let result = std::panic::catch_unwind(|| issuer.issue(1, 7, SECRET_A, ttl));

        assert_eq!(
            result.expect("Issuing must not panic"),
            Err(JwtError::InvalidTtl(100_000_000_000_000))
        );
    }

    #[test]
    fn test_verify_invalid_token() {
        let issuer = TokenIssuer::new();

        let result = issuer.verify("invalid.token.here", 7, SECRET_A);
        assert!(result.is_err());
    }
}
