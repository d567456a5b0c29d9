use once_cell::sync::Lazy;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::{env, time::Duration};
use tracing::info;

pub static DATABASE_URL: Lazy<String> = Lazy::new(|| {
    // Load .env if present
    let _ = dotenvy::dotenv();
    env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://data/clientdesk.db?mode=rwc".to_string())
});

/// Pool settings for the embedded database; resolved from `config.toml`
/// when present, otherwise from the environment.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub sqlx_logging: bool,
}

impl DatabaseConfig {
    pub fn from_env() -> Self {
        Self {
            url: DATABASE_URL.clone(),
            max_connections: 5,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(30),
            sqlx_logging: false,
        }
    }

    pub fn from_file() -> anyhow::Result<Self> {
        let mut cfg = configs::load_default()?;
        cfg.normalize_and_validate()?;
        let d = cfg.database;
        Ok(Self {
            url: d.url,
            max_connections: d.max_connections,
            min_connections: d.min_connections,
            acquire_timeout: Duration::from_secs(d.acquire_timeout_secs),
            sqlx_logging: d.sqlx_logging,
        })
    }
}

pub async fn connect() -> anyhow::Result<DatabaseConnection> {
    let cfg = DatabaseConfig::from_file().unwrap_or_else(|_| DatabaseConfig::from_env());
    connect_with_config(&cfg).await
}

pub async fn connect_with_config(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let mut opts = ConnectOptions::new(cfg.url.clone());
    opts.max_connections(cfg.max_connections)
        .min_connections(cfg.min_connections)
        .acquire_timeout(cfg.acquire_timeout)
        .sqlx_logging(cfg.sqlx_logging);
    let db = Database::connect(opts).await?;
    info!(url = %cfg.url, "database connected");
    Ok(db)
}
