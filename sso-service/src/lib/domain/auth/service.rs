use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;
use auth::TokenIssuer;
use chrono::Duration;
use tracing::Instrument;
use tracing::Span;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::AppId;
use crate::domain::auth::models::EmailAddress;
use crate::domain::auth::models::User;
use crate::domain::auth::models::UserId;
use crate::domain::auth::ports::AppProvider;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::auth::ports::CredentialHasher;
use crate::domain::auth::ports::UserProvider;
use crate::domain::auth::ports::UserSaver;
use crate::domain::auth::validation::RequestValidator;

/// Values the engine needs from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthSettings {
    pub token_ttl: Duration,
    pub min_password_length: usize,
}

/// Stand-in hash checked when the email is unknown, so that login costs one
/// Argon2id verification whether or not the account exists. Parameters match
/// `argon2::Params::default()`; no password verifies against it.
pub(crate) const UNKNOWN_USER_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$dW5rbm93bi11c2VyLXNhbHQ$xpXiZfAOxUeVt8PYmUKuXMwg+YhnsV8eKfFNnXMSqJ8";

/// Auth engine: registration, login and the admin check.
///
/// Stateless per call. Every dependency, including the span its logs are
/// recorded under, is handed in at construction.
pub struct AuthService<US, UP, AP, H = PasswordHasher>
where
    US: UserSaver,
    UP: UserProvider,
    AP: AppProvider,
    H: CredentialHasher,
{
    span: Span,
    settings: AuthSettings,
    validator: RequestValidator,
    user_saver: Arc<US>,
    user_provider: Arc<UP>,
    app_provider: Arc<AP>,
    password_hasher: Arc<H>,
    token_issuer: TokenIssuer,
}

impl<US, UP, AP> AuthService<US, UP, AP>
where
    US: UserSaver,
    UP: UserProvider,
    AP: AppProvider,
{
    /// Create a new auth service hashing with Argon2id.
    ///
    /// # Arguments
    /// * `span` - Parent span for every operation's logs
    /// * `settings` - Token TTL and password policy
    /// * `user_saver` - User persistence
    /// * `user_provider` - User lookups
    /// * `app_provider` - App lookups
    pub fn new(
        span: Span,
        settings: AuthSettings,
        user_saver: Arc<US>,
        user_provider: Arc<UP>,
        app_provider: Arc<AP>,
    ) -> Self {
        Self::with_hasher(
            span,
            settings,
            user_saver,
            user_provider,
            app_provider,
            Arc::new(PasswordHasher::new()),
        )
    }
}

impl<US, UP, AP, H> AuthService<US, UP, AP, H>
where
    US: UserSaver,
    UP: UserProvider,
    AP: AppProvider,
    H: CredentialHasher,
{
    pub fn with_hasher(
        span: Span,
        settings: AuthSettings,
        user_saver: Arc<US>,
        user_provider: Arc<UP>,
        app_provider: Arc<AP>,
        password_hasher: Arc<H>,
    ) -> Self {
        Self {
            span,
            settings,
            validator: RequestValidator::new(settings.min_password_length),
            user_saver,
            user_provider,
            app_provider,
            password_hasher,
            token_issuer: TokenIssuer::new(),
        }
    }

    async fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let hasher = Arc::clone(&self.password_hasher);
        let password = password.to_owned();

        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AuthError::Unknown(format!("Password hashing task failed: {}", e)))?
            .map_err(|e| AuthError::Unknown(format!("Password hashing failed: {}", e)))
    }

    async fn verify_password(&self, password: &str, user: &User) -> Result<bool, AuthError> {
        let hasher = Arc::clone(&self.password_hasher);
        let password = password.to_owned();
        let hash = user.password_hash.clone();

        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| AuthError::Unknown(format!("Password verification task failed: {}", e)))?
            .map_err(|e| AuthError::CorruptCredential {
                user_id: user.id,
                reason: e.to_string(),
            })
    }

    /// Spend the same verification work as a real account, then discard it.
    async fn verify_unknown_user(&self, password: &str) {
        let hasher = Arc::clone(&self.password_hasher);
        let password = password.to_owned();

        let result =
            tokio::task::spawn_blocking(move || hasher.verify(&password, UNKNOWN_USER_HASH)).await;
        if let Err(e) = result {
            tracing::warn!(error = %e, "Password verification task failed");
        }
    }
}

#[async_trait]
impl<US, UP, AP, H> AuthServicePort for AuthService<US, UP, AP, H>
where
    US: UserSaver,
    UP: UserProvider,
    AP: AppProvider,
    H: CredentialHasher,
{
    async fn register(&self, email: &str, password: &str) -> Result<UserId, AuthError> {
        let span = tracing::info_span!(parent: &self.span, "register");

        async move {
            self.validator.validate_register(email, password)?;
            let email = EmailAddress::new(email)?;

            let password_hash = self.hash_password(password).await?;

            let user_id = self
                .user_saver
                .save_user(&email, &password_hash)
                .await
                .map_err(|e| {
                    let err = AuthError::from(e);
                    match &err {
                        AuthError::UserAlreadyExists(_) => tracing::warn!("User already exists"),
                        _ => tracing::error!(error = %err, "Failed to save user"),
                    }
                    err
                })?;

            tracing::info!(user_id = %user_id, "User registered");
            Ok(user_id)
        }
        .instrument(span)
        .await
    }

    async fn login(
        &self,
        email: &str,
        password: &str,
        app_id: AppId,
    ) -> Result<String, AuthError> {
        let span = tracing::info_span!(parent: &self.span, "login", app_id = %app_id);

        async move {
            self.validator.validate_login(email, password, app_id)?;
            let email = EmailAddress::normalized(email);

            let Some(user) = self.user_provider.user_by_email(&email).await? else {
                self.verify_unknown_user(password).await;
                tracing::info!("Login rejected: unknown email");
                return Err(AuthError::InvalidCredentials);
            };

            if !self.verify_password(password, &user).await? {
                tracing::info!(user_id = %user.id, "Login rejected: wrong password");
                return Err(AuthError::InvalidCredentials);
            }

            let app = self
                .app_provider
                .app(app_id)
                .await?
                .ok_or(AuthError::AppNotFound(app_id))?;

            let token = self.token_issuer.issue(
                user.id.as_i64(),
                app.id.as_i32(),
                app.secret.as_bytes(),
                self.settings.token_ttl,
            )?;

            tracing::info!(user_id = %user.id, "User logged in");
            Ok(token)
        }
        .instrument(span)
        .await
    }

    async fn is_admin(&self, user_id: UserId) -> Result<bool, AuthError> {
        let span = tracing::info_span!(parent: &self.span, "is_admin", user_id = %user_id);

        async move {
            self.validator.validate_is_admin(user_id)?;

            let user = self
                .user_provider
                .user_by_id(user_id)
                .await?
                .ok_or(AuthError::UserNotFound(user_id))?;

            tracing::debug!(is_admin = user.is_admin, "Checked admin flag");
            Ok(user.is_admin)
        }
        .instrument(span)
        .await
    }

    fn validator(&self) -> RequestValidator {
        self.validator
    }
}
