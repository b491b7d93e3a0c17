//! User Lifecycle Service
//!
//! CRUD over user records with a protected system user and e-mail
//! notifications on create, update and delete. Users live in memory or in
//! PostgreSQL depending on configuration.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use anyhow::Context;
use api::state::AppState;
use domain::{User, UserCandidate, UserId};
use infrastructure::{
    notification::LoggingNotificationGateway,
    storage::{connect_pool, StorageType},
    user::{InMemoryUserRepository, PostgresUserRepository, UserService},
};
use tracing::info;

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let notifier = Arc::new(
        LoggingNotificationGateway::new(config.notification.sender.clone())
            .with_enabled(config.notification.enabled),
    );

    let storage_type: StorageType = config
        .storage
        .backend
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    let state = match storage_type {
        StorageType::InMemory => {
            info!("Using in-memory user store");
            let repository = Arc::new(InMemoryUserRepository::with_users(vec![reserved_user(
                config,
            )]));
            AppState::new(Arc::new(UserService::new(repository, notifier)))
        }
        StorageType::Postgres => {
            info!("Using PostgreSQL user store");
            let repository = Arc::new(open_postgres_repository(config).await?);
            AppState::new(Arc::new(UserService::new(repository, notifier)))
        }
    };

    Ok(state)
}

/// Connect to PostgreSQL, create the schema if needed and seed the system user
pub async fn open_postgres_repository(config: &AppConfig) -> anyhow::Result<PostgresUserRepository> {
    let pool = connect_pool(&config.storage.postgres)
        .await
        .context("connecting to the user database")?;
    let repository = PostgresUserRepository::new(pool);

    repository.ensure_schema().await?;
    repository
        .seed_reserved_user(&config.reserved_user.name, &config.reserved_user.email)
        .await?;

    Ok(repository)
}

fn reserved_user(config: &AppConfig) -> User {
    User::new(
        UserId::RESERVED,
        UserCandidate::new(
            config.reserved_user.name.clone(),
            config.reserved_user.email.clone(),
        ),
    )
}
