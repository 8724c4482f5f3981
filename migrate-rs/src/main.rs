//! migrate-rs: copy reservation users into Clerk accounts
//!
//! Takes no arguments. Requires `SUPABASE_DB_PASSWORD` and
//! `CLERK_SECRET_KEY`; reads `migrate.toml` from the working directory when
//! present.

use migrate_rs::config::{MigrateConfig, Secrets};
use migrate_rs::migration;
use std::path::Path;
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = MigrateConfig::load_from_dir(Path::new("."))?;

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("migrate_rs={}", config.logging.level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let secrets = match Secrets::from_env() {
        Ok(secrets) => secrets,
        Err(e) => {
            error!("Error: {}", e);
            std::process::exit(1);
        }
    };

    // Database failures are logged where they occur and still exit 0
    if let Err(e) = migration::run(&config, &secrets).await {
        debug!("Migration aborted: {}", e);
    }

    Ok(())
}
