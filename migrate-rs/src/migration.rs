//! The migration pipeline: read every user, then create their accounts

use tracing::{error, info};

use crate::config::{MigrateConfig, Secrets};
use crate::error::Result;
use crate::sink::{AccountMigrator, ClerkClient, IdentityProvider, MigrationOutcome};
use crate::source::{read_users, PostgresSource, UserSource};

/// Read all users from `source` (closing it), then migrate them in order.
///
/// Only a source failure is returned as `Err` (already logged); per-user
/// failures are outcomes.
pub async fn migrate<S, P>(source: S, migrator: &AccountMigrator<P>) -> Result<Vec<MigrationOutcome>>
where
    S: UserSource,
    P: IdentityProvider,
{
    let users = read_users(source).await?;
    info!("Found {} users to potentially migrate.", users.len());

    let outcomes = migrator.migrate_all(&users).await;
    info!("Migration run complete.");

    Ok(outcomes)
}

/// Connect to the configured database and migrate into Clerk.
///
/// Database failures are logged here, each followed by a single
/// `Database connection closed.` line, before being returned.
pub async fn run(config: &MigrateConfig, secrets: &Secrets) -> Result<Vec<MigrationOutcome>> {
    info!("Connecting to Supabase database...");
    let source = match PostgresSource::connect(&config.database, secrets).await {
        Ok(source) => source,
        Err(e) => {
            // Nothing was acquired, but the close is still reported once
            error!("{}", e);
            info!("Database connection closed.");
            return Err(e);
        }
    };
    info!("Successfully connected to Supabase.");

    let provider = ClerkClient::new(&config.identity, secrets.api_secret_key.clone());
    let migrator = AccountMigrator::new(provider, config.password.length);

    migrate(source, &migrator).await
}
