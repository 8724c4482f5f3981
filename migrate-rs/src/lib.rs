//! migrate-rs: one-shot user migration into Clerk
//!
//! Reads `(user_email, user_name)` rows from the `reservation` table of a
//! PostgreSQL database and creates a Clerk account for each, with a freshly
//! generated random password.
//!
//! # Pipeline
//!
//! 1. [`config::Secrets`] are read from the environment; nothing else runs
//!    without them.
//! 2. [`source::read_users`] runs the single query and closes the connection.
//! 3. [`sink::AccountMigrator`] issues one create-user request per row, in
//!    row order, and classifies each response as a
//!    [`sink::MigrationOutcome`].
//!
//! There is no retry, checkpoint or concurrency: re-running is safe only
//! because Clerk rejects duplicate email addresses, which is reported as
//! [`sink::MigrationOutcome::AlreadyExists`].
//!
//! # Example Configuration
//!
//! Every key is optional; `migrate.toml` in the working directory overrides
//! the built-in defaults.
//!
//! ```toml
//! [database]
//! host = "db.example.supabase.co"
//! port = 5432
//! name = "postgres"
//! user = "postgres"
//!
//! [identity]
//! base_url = "https://api.clerk.com/v1"
//!
//! [password]
//! length = 12
//! ```

pub mod config;
pub mod credential;
pub mod error;
pub mod migration;
pub mod sink;
pub mod source;

pub use config::{MigrateConfig, Secrets};
pub use error::{MigrateError, Result};
pub use sink::MigrationOutcome;
pub use source::UserRecord;
