use color_eyre::{Result, eyre::Context};
use migration::MigratorTrait;
use sea_orm::{ConnectOptions, Database as SeaDatabase, DatabaseConnection};

use crate::config::DatabaseConfig;

/// Pooled connection shared by the services. Each service instance is handed
/// its own `Arc<Database>` instead of reaching for a process-wide pool.
pub struct Database {
    pub conn: DatabaseConnection,
}

impl Database {
    /// Connect using the given settings, without touching the schema
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let url = config.resolve_url();
        log::debug!("Connecting to database");

        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(config.connect_timeout())
            .acquire_timeout(config.connect_timeout())
            .sqlx_logging(config.sqlx_logging);

        // sqlx opens every SQLite connection with `foreign_keys = ON`,
        // which the album cascade relies on
        let conn = SeaDatabase::connect(opt)
            .await
            .wrap_err("Failed to connect to database")?;

        Ok(Database { conn })
    }

    /// Connect and apply every pending migration
    pub async fn open(config: &DatabaseConfig) -> Result<Self> {
        let database = Self::connect(config).await?;
        database.migrate_up().await?;
        log::info!("Database ready");
        Ok(database)
    }

    pub async fn migrate_up(&self) -> Result<()> {
        log::debug!("Running database migrations");
        migration::Migrator::up(&self.conn, None)
            .await
            .wrap_err("Failed to run database migrations")
    }

    /// Roll back the most recent migration
    pub async fn migrate_down(&self) -> Result<()> {
        log::debug!("Rolling back last database migration");
        migration::Migrator::down(&self.conn, Some(1))
            .await
            .wrap_err("Failed to roll back database migration")
    }

    /// Names of applied and pending migrations, in order
    pub async fn migration_status(&self) -> Result<(Vec<String>, Vec<String>)> {
        let applied = migration::Migrator::get_applied_migrations(&self.conn)
            .await
            .wrap_err("Failed to read applied migrations")?
            .iter()
            .map(|m| m.name().to_string())
            .collect();
        let pending = migration::Migrator::get_pending_migrations(&self.conn)
            .await
            .wrap_err("Failed to read pending migrations")?
            .iter()
            .map(|m| m.name().to_string())
            .collect();

        Ok((applied, pending))
    }
}
