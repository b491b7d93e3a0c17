//! Migrate command - prepares the PostgreSQL user store

use tracing::info;

use crate::config::AppConfig;
use crate::infrastructure::logging::init_logging;
use crate::infrastructure::storage::StorageType;

/// Create the users table and seed the system user, then exit
pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    init_logging(&config.logging);

    let backend: StorageType = config
        .storage
        .backend
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    if backend != StorageType::Postgres {
        info!(backend = %config.storage.backend, "Nothing to migrate for this backend");
        return Ok(());
    }

    let repository = crate::open_postgres_repository(&config).await?;
    repository.ping().await?;

    info!("User schema is up to date");

    Ok(())
}
