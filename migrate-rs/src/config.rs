//! Configuration for migrate-rs
//!
//! Non-secret settings come from compiled-in defaults, optionally replaced
//! section by section from a `migrate.toml` file. The two secrets are only
//! ever read from the process environment (see [`Secrets`]).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::credential::DEFAULT_PASSWORD_LENGTH;
use crate::error::{MigrateError, Result};

/// Config file looked up in the working directory
pub const CONFIG_FILE: &str = "migrate.toml";

/// Environment variable holding the database password
pub const DB_PASSWORD_VAR: &str = "SUPABASE_DB_PASSWORD";

/// Environment variable holding the identity provider secret key
pub const API_SECRET_VAR: &str = "CLERK_SECRET_KEY";

/// Main migration configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MigrateConfig {
    /// Source database
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Identity provider API
    #[serde(default)]
    pub identity: IdentityConfig,
    /// Generated password settings
    #[serde(default)]
    pub password: PasswordConfig,
    /// Logging
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Database connection target (the password is a secret)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_host")]
    pub host: String,
    #[serde(default = "default_db_port")]
    pub port: u16,
    #[serde(default = "default_db_name")]
    pub name: String,
    #[serde(default = "default_db_user")]
    pub user: String,
}

/// Identity provider API
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IdentityConfig {
    /// Base URL, `/users` is appended for account creation
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PasswordConfig {
    #[serde(default = "default_password_length")]
    pub length: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Level used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_db_host() -> String {
    "db.nsnpuroomnhzmriysgvo.supabase.co".to_string()
}

fn default_db_port() -> u16 {
    5432
}

fn default_db_name() -> String {
    "postgres".to_string()
}

fn default_db_user() -> String {
    "postgres".to_string()
}

fn default_base_url() -> String {
    "https://api.clerk.com/v1".to_string()
}

fn default_password_length() -> usize {
    DEFAULT_PASSWORD_LENGTH
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: default_db_host(),
            port: default_db_port(),
            name: default_db_name(),
            user: default_db_user(),
        }
    }
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            length: default_password_length(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl MigrateConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| MigrateError::Config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| MigrateError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Load `migrate.toml` from `dir` if present, defaults otherwise
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        let config = if path.exists() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.database.host.trim().is_empty() {
            return Err(MigrateError::Config("Database host is empty".to_string()));
        }

        url::Url::parse(&self.identity.base_url).map_err(|e| {
            MigrateError::Config(format!(
                "Invalid identity base URL '{}': {}",
                self.identity.base_url, e
            ))
        })?;

        if self.password.length == 0 {
            return Err(MigrateError::Config(
                "Password length must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

/// Secrets required before any I/O may happen
#[derive(Clone)]
pub struct Secrets {
    pub db_password: String,
    pub api_secret_key: String,
}

impl Secrets {
    /// Read both secrets from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read both secrets through `lookup`.
    ///
    /// The database password is checked first; an empty value counts as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.is_empty())
                .ok_or(MigrateError::MissingSecret(name))
        };

        let db_password = require(DB_PASSWORD_VAR)?;
        let api_secret_key = require(API_SECRET_VAR)?;

        Ok(Self {
            db_password,
            api_secret_key,
        })
    }
}

impl fmt::Debug for Secrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secrets")
            .field("db_password", &"<redacted>")
            .field("api_secret_key", &"<redacted>")
            .finish()
    }
}
