use async_trait::async_trait;
use auth::PasswordError;
use auth::PasswordHasher;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::errors::StorageError;
use crate::domain::auth::models::App;
use crate::domain::auth::models::AppId;
use crate::domain::auth::models::EmailAddress;
use crate::domain::auth::models::User;
use crate::domain::auth::models::UserId;
use crate::domain::auth::validation::RequestValidator;

/// Port for the auth engine operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new user.
    ///
    /// # Arguments
    /// * `email` - Raw email, normalized before storage
    /// * `password` - Plaintext password, hashed before storage
    ///
    /// # Returns
    /// Identifier assigned to the new user
    ///
    /// # Errors
    /// * `InvalidArgument` - Empty or malformed email, empty password
    /// * `UserAlreadyExists` - Email is already registered
    /// * `StorageUnavailable` - Storage operation failed
    async fn register(&self, email: &str, password: &str) -> Result<UserId, AuthError>;

    /// Authenticate a user and issue a token scoped to `app_id`.
    ///
    /// # Returns
    /// Signed access token
    ///
    /// # Errors
    /// * `InvalidArgument` - Request shape is invalid
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `AppNotFound` - No app with this identifier
    /// * `CorruptCredential` - Stored hash is unreadable
    /// * `StorageUnavailable` - Storage operation failed
    async fn login(&self, email: &str, password: &str, app_id: AppId)
        -> Result<String, AuthError>;

    /// Report whether a user holds the administrator flag.
    ///
    /// # Errors
    /// * `InvalidArgument` - Zero user id
    /// * `UserNotFound` - User does not exist
    /// * `StorageUnavailable` - Storage operation failed
    async fn is_admin(&self, user_id: UserId) -> Result<bool, AuthError>;

    /// Request checks the engine applies, shared with inbound adapters.
    fn validator(&self) -> RequestValidator;
}

/// Hashes and checks passwords. Calls are CPU-bound and blocking.
pub trait CredentialHasher: Send + Sync + 'static {
    fn hash(&self, password: &str) -> Result<String, PasswordError>;

    /// `Ok(false)` on mismatch, `Err` only when `hash` is unusable.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError>;
}

impl CredentialHasher for PasswordHasher {
    fn hash(&self, password: &str) -> Result<String, PasswordError> {
        PasswordHasher::hash(self, password)
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        PasswordHasher::verify(self, password, hash)
    }
}

/// Persists new users.
#[async_trait]
pub trait UserSaver: Send + Sync + 'static {
    /// Insert a user with the given email and password hash.
    ///
    /// Email uniqueness must be enforced atomically by the store.
    ///
    /// # Returns
    /// Identifier assigned by the store
    ///
    /// # Errors
    /// * `DuplicateEmail` - Email is already registered
    /// * `Unavailable` - Storage operation failed
    async fn save_user(
        &self,
        email: &EmailAddress,
        password_hash: &str,
    ) -> Result<UserId, StorageError>;
}

/// Reads users.
#[async_trait]
pub trait UserProvider: Send + Sync + 'static {
    /// Retrieve user by normalized email.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `Unavailable` - Storage operation failed
    async fn user_by_email(&self, email: &EmailAddress) -> Result<Option<User>, StorageError>;

    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `Unavailable` - Storage operation failed
    async fn user_by_id(&self, id: UserId) -> Result<Option<User>, StorageError>;
}

/// Reads registered apps and their signing secrets.
#[async_trait]
pub trait AppProvider: Send + Sync + 'static {
    /// Retrieve app by identifier.
    ///
    /// # Returns
    /// Optional app entity (None if not found)
    ///
    /// # Errors
    /// * `Unavailable` - Storage operation failed
    async fn app(&self, id: AppId) -> Result<Option<App>, StorageError>;
}
