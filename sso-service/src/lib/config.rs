use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

use crate::domain::auth::service::AuthSettings;
use crate::domain::auth::validation::DEFAULT_MIN_PASSWORD_LENGTH;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Deployment environment: `local`, `dev` or `prod`. Selects the log format.
    #[serde(default = "default_env")]
    pub env: String,
    /// SQLite database file (or `sqlite:` URL)
    pub storage_path: String,
    pub grpc: GrpcConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GrpcConfig {
    pub port: u16,
    /// Per-request deadline enforced by the server
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub token_ttl_secs: i64,
    #[serde(default = "default_min_password_length")]
    pub min_password_length: usize,
}

fn default_env() -> String {
    "local".to_string()
}

fn default_min_password_length() -> usize {
    DEFAULT_MIN_PASSWORD_LENGTH
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (GRPC__PORT, AUTH__TOKEN_TTL_SECS, etc.)
    /// 2. File named by CONFIG_PATH
    /// 3. Environment-specific config file (config/{RUN_MODE}.toml)
    /// 4. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "local".to_string());

        let mut builder = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false));

        if let Ok(path) = env::var("CONFIG_PATH") {
            builder = builder.add_source(File::with_name(&path).required(true));
        }

        let configuration = builder
            // Example: GRPC__PORT=50051 overrides grpc.port
            .add_source(Environment::default().separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Reject values the auth engine cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.token_ttl_secs <= 0 {
            return Err(ConfigError::Message(format!(
                "auth.token_ttl_secs must be positive, got {}",
                self.auth.token_ttl_secs
            )));
        }

        // Tokens issued now must have a representable expiry.
        let ttl_in_range = chrono::Duration::try_seconds(self.auth.token_ttl_secs)
            .and_then(|ttl| chrono::Utc::now().checked_add_signed(ttl))
            .is_some();
        if !ttl_in_range {
            return Err(ConfigError::Message(format!(
                "auth.token_ttl_secs is out of range, got {}",
                self.auth.token_ttl_secs
            )));
        }

        if self.auth.min_password_length == 0 {
            return Err(ConfigError::Message(
                "auth.min_password_length must be positive".to_string(),
            ));
        }

        if self.storage_path.is_empty() {
            return Err(ConfigError::Message("storage_path is required".to_string()));
        }

        Ok(())
    }

    pub fn auth_settings(&self) -> AuthSettings {
        AuthSettings {
            token_ttl: chrono::Duration::seconds(self.auth.token_ttl_secs),
            min_password_length: self.auth.min_password_length,
        }
    }
}
