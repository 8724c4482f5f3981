//! Error types for migrate-rs

use thiserror::Error;

/// Result type alias for migration operations
pub type Result<T> = std::result::Result<T, MigrateError>;

/// Migration error types
///
/// Per-user failures during account creation are not errors: they are
/// reported as [`crate::sink::MigrationOutcome`] values so a single user can
/// never abort the batch.
#[derive(Error, Debug)]
pub enum MigrateError {
    /// A required secret is unset or empty
    #[error("{0} environment variable not set.")]
    MissingSecret(&'static str),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}
