#![cfg(test)]
use std::time::Duration;

use migration::MigratorTrait;
use models::db::{connect_with_config, DatabaseConfig};
use sea_orm::DatabaseConnection;

/// Fresh, fully-migrated in-memory database for one test.
/// Capped at a single connection: every sqlite `:memory:` connection is a
/// separate database, so a larger pool would hand out empty schemas.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let cfg = DatabaseConfig {
        url: "sqlite::memory:".into(),
        max_connections: 1,
        min_connections: 1,
        acquire_timeout: Duration::from_secs(5),
        sqlx_logging: false,
    };
    let db = connect_with_config(&cfg).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}
