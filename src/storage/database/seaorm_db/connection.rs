use crate::config::DatabaseConfig;
use crate::utils::error::{MediaError, Result};
use sea_orm::*;
use sea_orm_migration::MigratorTrait;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::super::migration::Migrator;
use super::types::SeaOrmRepository;

impl SeaOrmRepository {
    /// Connect to the database described by `config`
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let mut opt = ConnectOptions::new(config.url.clone());
        opt.max_connections(Self::pool_size(config))
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.connection_timeout))
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(3600))
            .sqlx_logging(true)
            .sqlx_logging_level(log::LevelFilter::Debug);

        let db = Database::connect(opt)
            .await
            .map_err(MediaError::Database)?;

        info!(
            "Database connection established ({:?})",
            db.get_database_backend()
        );
        Ok(Self { db })
    }

    /// Wrap an existing connection
    pub fn from_connection(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Every pooled connection to an in-memory SQLite database sees its own
    /// empty database, so those pools hold a single connection.
    fn pool_size(config: &DatabaseConfig) -> u32 {
        if config.url.starts_with("sqlite") && config.url.contains(":memory:") {
            1
        } else {
            config.max_connections
        }
    }

    /// Run database migrations
    pub async fn migrate(&self) -> Result<()> {
        info!("Running database migrations...");
        Migrator::up(&self.db, None).await.map_err(|e| {
            warn!("Migration failed: {}", e);
            MediaError::Database(e)
        })?;
        info!("Database migrations completed successfully");
        Ok(())
    }

    /// Get the underlying database connection
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Close the database connection
    pub async fn close(self) -> Result<()> {
        self.db.close().await.map_err(MediaError::Database)?;
        Ok(())
    }

    pub(super) async fn ping(&self) -> Result<()> {
        debug!("Performing database health check");
        self.db.ping().await.map_err(MediaError::Database)?;
        debug!("Database health check passed");
        Ok(())
    }
}
