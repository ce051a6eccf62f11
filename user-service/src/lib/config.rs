use std::env;

use auth::LifetimesError;
use auth::TokenLifetimes;
use chrono::Duration;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

use crate::validation::Validator;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
    #[serde(default = "default_shutdown_timeout_secs")]
    pub shutdown_timeout_secs: u64,
}

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_access_token_ttl_minutes")]
    pub access_token_ttl_minutes: i64,
    #[serde(default = "default_refresh_token_ttl_minutes")]
    pub refresh_token_ttl_minutes: i64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("access_token_ttl_minutes", &self.access_token_ttl_minutes)
            .field("refresh_token_ttl_minutes", &self.refresh_token_ttl_minutes)
            .finish()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ValidationConfig {
    #[serde(default = "default_password_min_length")]
    pub password_min_length: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            password_min_length: default_password_min_length(),
        }
    }
}

fn default_max_connections() -> u32 {
    5
}

fn default_shutdown_timeout_secs() -> u64 {
    15
}

fn default_access_token_ttl_minutes() -> i64 {
    5
}

fn default_refresh_token_ttl_minutes() -> i64 {
    30
}

fn default_password_min_length() -> usize {
    Validator::DEFAULT_PASSWORD_MIN_LENGTH
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (APP__DATABASE__URL, APP__JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: APP__DATABASE__URL=postgres://... overrides database.url
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = configuration.try_deserialize()?;

        Ok(config)
    }

    /// Token validity windows from the `jwt` section.
    ///
    /// # Errors
    /// * `InvalidLifetimes` - Access lifetime is not positive or not shorter
    ///   than the refresh lifetime
    /// * `OutOfRange` - A lifetime is too large to turn into an expiry
    pub fn token_lifetimes(&self) -> Result<TokenLifetimes, LifetimesError> {
        let access = Duration::try_minutes(self.jwt.access_token_ttl_minutes)
            .ok_or(LifetimesError::OutOfRange)?;
        let refresh = Duration::try_minutes(self.jwt.refresh_token_ttl_minutes)
            .ok_or(LifetimesError::OutOfRange)?;

        TokenLifetimes::new(access, refresh)
    }

    pub fn validator(&self) -> Validator {
        Validator::new(self.validation.password_min_length)
    }

    pub fn shutdown_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.server.shutdown_timeout_secs)
    }
}
