//! PostgreSQL user source
//!
//! Holds a single connection (no pool): the migration issues exactly one
//! query and then releases it.

use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::Connection;
use tracing::debug;

use super::{UserRecord, UserSource, USERS_QUERY};
use crate::config::{DatabaseConfig, Secrets};
use crate::error::Result;

/// Open connection to the reservation database
pub struct PostgresSource {
    conn: PgConnection,
}

impl PostgresSource {
    /// Build connection options from the target and the secret password
    pub fn connect_options(config: &DatabaseConfig, password: &str) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .database(&config.name)
            .username(&config.user)
            .password(password)
    }

    /// Connect to the configured database
    pub async fn connect(config: &DatabaseConfig, secrets: &Secrets) -> Result<Self> {
        debug!(
            "Connecting to postgres at {}:{}/{} as {}",
            config.host, config.port, config.name, config.user
        );

        let options = Self::connect_options(config, &secrets.db_password);
        let conn = PgConnection::connect_with(&options).await?;

        Ok(Self { conn })
    }
}

#[async_trait]
impl UserSource for PostgresSource {
    async fn fetch_users(&mut self) -> Result<Vec<UserRecord>> {
        // Both columns are nullable in the reservation schema
        let rows: Vec<(Option<String>, Option<String>)> =
            sqlx::query_as(USERS_QUERY).fetch_all(&mut self.conn).await?;

        debug!("Query returned {} rows", rows.len());

        Ok(rows
            .into_iter()
            .map(|(email, name)| UserRecord {
                email: email.unwrap_or_default(),
                display_name: name,
            })
            .collect())
    }

    async fn close(self) -> Result<()> {
        self.conn.close().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::read_users;

    #[test]
    fn test_connect_options_use_config() {
        let config = DatabaseConfig {
            host: "db.internal".to_string(),
            port: 6543,
            name: "reservations".to_string(),
            user: "migrator".to_string(),
        };

        let options = PostgresSource::connect_options(&config, "secret");

        assert_eq!(options.get_host(), "db.internal");
        assert_eq!(options.get_port(), 6543);
        assert_eq!(options.get_database(), Some("reservations"));
        assert_eq!(options.get_username(), "migrator");
    }

    #[tokio::test]
    #[ignore] // Only run when a reservation database is reachable
    async fn test_read_users_from_live_database() {
        let config = crate::config::MigrateConfig::default();
        let secrets = Secrets::from_env().unwrap();

        let source = PostgresSource::connect(&config.database, &secrets)
            .await
            .unwrap();
        let users = read_users(source).await.unwrap();

        println!("Fetched {} users", users.len());
    }
}
