use crate::domain::auth::errors::ValidationError;
use crate::domain::auth::models::AppId;
use crate::domain::auth::models::UserId;

pub const DEFAULT_MIN_PASSWORD_LENGTH: usize = 12;

/// Request shape checks run before any storage access.
///
/// Pure and cheap: no I/O, no hashing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestValidator {
    min_password_length: usize,
}

impl RequestValidator {
    pub fn new(min_password_length: usize) -> Self {
        Self {
            min_password_length,
        }
    }

    pub fn min_password_length(&self) -> usize {
        self.min_password_length
    }

    /// Login needs an email, a password of at least the configured length
    /// (counted in characters) and a non-zero app id.
    pub fn validate_login(
        &self,
        email: &str,
        password: &str,
        app_id: AppId,
    ) -> Result<(), ValidationError> {
        if email.is_empty() {
            return Err(ValidationError::EmailRequired);
        }

        if password.is_empty() {
            return Err(ValidationError::PasswordRequired);
        }

        if password.chars().count() < self.min_password_length {
            return Err(ValidationError::PasswordTooShort {
                min: self.min_password_length,
            });
        }

        if app_id.as_i32() == 0 {
            return Err(ValidationError::AppIdRequired);
        }

        Ok(())
    }

    /// Register needs a non-empty email and password; no length floor.
    pub fn validate_register(&self, email: &str, password: &str) -> Result<(), ValidationError> {
        if email.is_empty() {
            return Err(ValidationError::EmailRequired);
        }

        if password.is_empty() {
            return Err(ValidationError::PasswordRequired);
        }

        Ok(())
    }

    pub fn validate_is_admin(&self, user_id: UserId) -> Result<(), ValidationError> {
        if user_id.as_i64() == 0 {
            return Err(ValidationError::UserIdRequired);
        }

        Ok(())
    }
}

impl Default for RequestValidator {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_PASSWORD_LENGTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_valid() {
        let validator = RequestValidator::default();
        assert_eq!(
            validator.validate_login("a@x.com", "hunter2hunter2", AppId(7)),
            Ok(())
        );
    }

    #[test]
    fn test_login_missing_email() {
        let validator = RequestValidator::default();
        assert_eq!(
            validator.validate_login("", "hunter2hunter2", AppId(7)),
            Err(ValidationError::EmailRequired)
        );
    }

    #[test]
    fn test_login_missing_password() {
        let validator = RequestValidator::default();
        assert_eq!(
            validator.validate_login("a@x.com", "", AppId(7)),
            Err(ValidationError::PasswordRequired)
        );
    }

    #[test]
    fn test_login_short_password() {
        let validator = RequestValidator::default();
        let err = validator
            .validate_login("a@x.com", "hunter22", AppId(7))
            .unwrap_err();

        assert_eq!(err, ValidationError::PasswordTooShort { min: 12 });
        assert_eq!(
            err.to_string(),
            "password must be at least 12 characters long"
        );
    }

    #[test]
    fn test_login_password_length_counts_characters() {
        let validator = RequestValidator::new(4);
        assert!(validator
            .validate_login("a@x.com", "éééé", AppId(1))
            .is_ok());
        // 3 characters, 6 bytes
        assert!(validator
            .validate_login("a@x.com", "ééé", AppId(1))
            .is_err());
    }

    #[test]
    fn test_login_zero_app_id() {
        let validator = RequestValidator::default();
        assert_eq!(
            validator.validate_login("a@x.com", "hunter2hunter2", AppId(0)),
            Err(ValidationError::AppIdRequired)
        );
    }

    #[test]
    fn test_register_has_no_length_floor() {
        let validator = RequestValidator::default();
        assert_eq!(validator.validate_register("a@x.com", "short"), Ok(()));
        assert_eq!(
            validator.validate_register("", "short"),
            Err(ValidationError::EmailRequired)
        );
        assert_eq!(
            validator.validate_register("a@x.com", ""),
            Err(ValidationError::PasswordRequired)
        );
    }

    #[test]
    fn test_is_admin_zero_user_id() {
        let validator = RequestValidator::default();
        assert_eq!(validator.validate_is_admin(UserId(1)), Ok(()));
        assert_eq!(
            validator.validate_is_admin(UserId(0)),
            Err(ValidationError::UserIdRequired)
        );
    }
}
