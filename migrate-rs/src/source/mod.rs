//! Source side of the migration: user records read from PostgreSQL
//!
//! A [`UserSource`] is an open connection that can fetch users once and must
//! then be closed. [`read_users`] is the scope that guarantees the close.

use async_trait::async_trait;
use tracing::{error, info, warn};

use crate::error::Result;

pub mod postgres;

pub use postgres::PostgresSource;

/// Query executed against the source database
pub const USERS_QUERY: &str = "SELECT user_email, user_name FROM reservation;";

/// One user row to migrate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub email: String,
    pub display_name: Option<String>,
}

impl UserRecord {
    pub fn new(email: impl Into<String>, display_name: Option<&str>) -> Self {
        Self {
            email: email.into(),
            display_name: display_name.map(str::to_string),
        }
    }
}

/// An open handle on the user table
#[async_trait]
pub trait UserSource: Send {
    /// Run the users query, returning rows in server order
    async fn fetch_users(&mut self) -> Result<Vec<UserRecord>>;

    /// Release the underlying connection
    async fn close(self) -> Result<()>;
}

/// Fetch every user from `source`, then close it.
///
/// The close runs whether or not the query succeeded. A query error is logged
/// before the close; a failure to close is logged and does not replace the
/// query result.
pub async fn read_users<S: UserSource>(mut source: S) -> Result<Vec<UserRecord>> {
    info!("Fetching users from 'reservation' table...");
    let result = source.fetch_users().await;
    if let Err(e) = &result {
        error!("{}", e);
    }

    if let Err(e) = source.close().await {
        warn!("Error while closing database connection: {}", e);
    }
    info!("Database connection closed.");

    result
}
