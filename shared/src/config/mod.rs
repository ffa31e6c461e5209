//! Configuration module with one sub-module per concern
//!
//! - `database` - MySQL connection pool settings
//! - `environment` - Environment detection and logging configuration
//! - `server` - HTTP server settings
//! - `token` - Token issuer, audience, key path and lifetimes
//!
//! Values are layered, lowest priority first: built-in defaults, an optional
//! config file, then `CREDKIT__`-prefixed environment variables using `__`
//! as the nesting separator (`CREDKIT__SERVER__PORT=9000`).

pub mod database;
pub mod environment;
pub mod server;
pub mod token;

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use server::ServerConfig;
pub use token::TokenConfig;

/// Prefix of environment variables read by [`AppConfig::load`]
pub const ENV_PREFIX: &str = "CREDKIT";

/// Nesting separator for environment variable keys
pub const ENV_SEPARATOR: &str = "__";

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub environment: Environment,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub token: TokenConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: Environment::from_env(),
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            logging: LoggingConfig::default(),
            token: TokenConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from `.env`, an optional file and the process
    /// environment
    ///
    /// The file format is chosen from its extension (`.toml`, `.json`,
    /// `.yaml`).
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        // A missing .env file is normal outside development
        let _ = dotenvy::dotenv();
        Self::load_with_env(path, None)
    }

    /// Same as [`AppConfig::load`] but reads environment variables from
    /// `vars` instead of the process when given
    pub fn load_with_env(
        path: Option<&Path>,
        vars: Option<HashMap<String, String>>,
    ) -> Result<Self, ConfigError> {
        let mut builder =
            ::config::Config::builder().add_source(::config::Config::try_from(&Self::default())?);

        if let Some(path) = path {
            builder = builder.add_source(::config::File::from(path));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix(ENV_PREFIX)
                .separator(ENV_SEPARATOR)
                .try_parsing(true)
                .source(vars),
        );

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values no component can run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Invalid("server.port must be non-zero".to_string()));
        }
        if self.token.issuer.is_empty() || self.token.audience.is_empty() {
            return Err(ConfigError::Invalid(
                "token.issuer and token.audience must be set".to_string(),
            ));
        }
        if self.token.private_key_path.is_empty() {
            return Err(ConfigError::Invalid(
                "token.private_key_path must be set".to_string(),
            ));
        }
        if self.token.access_token_ttl_secs <= 0 || self.token.refresh_token_ttl_secs <= 0 {
            return Err(ConfigError::Invalid(
                "token lifetimes must be positive".to_string(),
            ));
        }
        if self.database.is_enabled() && self.database.max_open_connections == 0 {
            return Err(ConfigError::Invalid(
                "database.max_open_connections must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}
