use std::fmt;

use tonic::metadata::MetadataMap;
use tonic::metadata::MetadataValue;
use tonic::Code;
use tonic::Status;

use crate::domain::auth::errors::AuthError;

pub mod is_admin;
pub mod login;
pub mod register;

/// Metadata key carrying the stable error code on every failed call.
pub const ERROR_CODE_KEY: &str = "error-code";

/// Error taxonomy exposed to callers.
///
/// Each domain failure keeps its own code. Infrastructure failures all
/// collapse into `Internal` and never carry detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    InvalidArgument,
    InvalidCredentials,
    UserAlreadyExists,
    AppNotFound,
    UserNotFound,
    Internal,
}

impl ErrorCode {
    const ALL: [ErrorCode; 6] = [
        ErrorCode::InvalidArgument,
        ErrorCode::InvalidCredentials,
        ErrorCode::UserAlreadyExists,
        ErrorCode::AppNotFound,
        ErrorCode::UserNotFound,
        ErrorCode::Internal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidArgument => "INVALID_ARGUMENT",
            ErrorCode::InvalidCredentials => "INVALID_CREDENTIALS",
            ErrorCode::UserAlreadyExists => "USER_ALREADY_EXISTS",
            ErrorCode::AppNotFound => "APP_NOT_FOUND",
            ErrorCode::UserNotFound => "USER_NOT_FOUND",
            ErrorCode::Internal => "INTERNAL",
        }
    }

    pub fn grpc_code(&self) -> Code {
        match self {
            ErrorCode::InvalidArgument => Code::InvalidArgument,
            ErrorCode::InvalidCredentials => Code::Unauthenticated,
            ErrorCode::UserAlreadyExists => Code::AlreadyExists,
            ErrorCode::AppNotFound | ErrorCode::UserNotFound => Code::NotFound,
            ErrorCode::Internal => Code::Internal,
        }
    }

    /// Read the code back from a status produced by this service.
    pub fn from_status(status: &Status) -> Option<Self> {
        let value = status.metadata().get(ERROR_CODE_KEY)?.to_str().ok()?;
        Self::ALL.into_iter().find(|code| code.as_str() == value)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&AuthError> for ErrorCode {
    fn from(err: &AuthError) -> Self {
        match err {
            AuthError::InvalidArgument(_) => ErrorCode::InvalidArgument,
            AuthError::InvalidCredentials => ErrorCode::InvalidCredentials,
            AuthError::UserAlreadyExists(_) => ErrorCode::UserAlreadyExists,
            AuthError::AppNotFound(_) => ErrorCode::AppNotFound,
            AuthError::UserNotFound(_) => ErrorCode::UserNotFound,
            AuthError::CorruptCredential { .. }
            | AuthError::StorageUnavailable(_)
            | AuthError::Token(_)
            | AuthError::Unknown(_) => ErrorCode::Internal,
        }
    }
}

impl From<AuthError> for Status {
    fn from(err: AuthError) -> Self {
        let code = ErrorCode::from(&err);

        let message = match &err {
            AuthError::InvalidArgument(e) => e.to_string(),
            AuthError::InvalidCredentials => "invalid email or password".to_string(),
            AuthError::UserAlreadyExists(_) => "user already exists".to_string(),
            AuthError::AppNotFound(_) => "app not found".to_string(),
            AuthError::UserNotFound(_) => "user not found".to_string(),
            _ => {
                tracing::error!(error = %err, "Internal error");
                "internal error".to_string()
            }
        };

        let mut metadata = MetadataMap::new();
        metadata.insert(ERROR_CODE_KEY, MetadataValue::from_static(code.as_str()));

        Status::with_metadata(code.grpc_code(), message, metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::auth::errors::ValidationError;
    use crate::domain::auth::models::AppId;
    use crate::domain::auth::models::UserId;

    #[test]
    fn test_domain_errors_keep_distinct_codes() {
        let cases = [
            (
                AuthError::InvalidArgument(ValidationError::EmailRequired),
                Code::InvalidArgument,
                ErrorCode::InvalidArgument,
            ),
            (
                AuthError::InvalidCredentials,
                Code::Unauthenticated,
                ErrorCode::InvalidCredentials,
            ),
            (
                AuthError::UserAlreadyExists("a@x.com".to_string()),
                Code::AlreadyExists,
                ErrorCode::UserAlreadyExists,
            ),
            (
                AuthError::AppNotFound(AppId(7)),
                Code::NotFound,
                ErrorCode::AppNotFound,
            ),
            (
                AuthError::UserNotFound(UserId(1)),
                Code::NotFound,
                ErrorCode::UserNotFound,
            ),
        ];

        for (err, grpc_code, error_code) in cases {
            let status = Status::from(err);
            assert_eq!(status.code(), grpc_code);
            assert_eq!(ErrorCode::from_status(&status), Some(error_code));
        }
    }

    #[test]
    fn test_invalid_argument_carries_field_message() {
        let status = Status::from(AuthError::InvalidArgument(
            ValidationError::PasswordTooShort { min: 12 },
        ));

        assert_eq!(
            status.message(),
            "password must be at least 12 characters long"
        );
    }

    #[test]
    fn test_user_already_exists_hides_email() {
        let status = Status::from(AuthError::UserAlreadyExists("a@x.com".to_string()));
        assert!(!status.message().contains("a@x.com"));
    }

    #[test]
    fn test_internal_errors_are_opaque() {
        let internal = [
            AuthError::StorageUnavailable("disk I/O error at /var/lib/sso.db".to_string()),
            AuthError::CorruptCredential {
                user_id: UserId(1),
                reason: "$argon2id$broken".to_string(),
            },
            AuthError::Token(auth::JwtError::EncodingFailed("bad key".to_string())),
            AuthError::Unknown("join error".to_string()),
        ];

        for err in internal {
            let status = Status::from(err);
            assert_eq!(status.code(), Code::Internal);
            assert_eq!(status.message(), "internal error");
            assert_eq!(ErrorCode::from_status(&status), Some(ErrorCode::Internal));
        }
    }

    #[test]
    fn test_from_status_without_metadata() {
        assert_eq!(ErrorCode::from_status(&Status::internal("boom")), None);
    }
}
