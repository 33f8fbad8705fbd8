use std::time::Duration;

use configs::DatabaseConfig;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

/// Connect with pool sizing and timeouts taken from configuration.
pub async fn connect_with_config(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let mut opt = ConnectOptions::new(cfg.url.clone());
    opt.max_connections(cfg.max_connections)
        .min_connections(cfg.min_connections)
        .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(cfg.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(cfg.max_lifetime_secs))
        .sqlx_logging(cfg.sqlx_logging);
    // an in-memory sqlite database exists per connection
    if cfg.url.starts_with("sqlite::memory:") {
        opt.max_connections(1).min_connections(1);
    }
    tracing::debug!(max = cfg.max_connections, min = cfg.min_connections, "opening database pool");
    let db = Database::connect(opt).await?;
    Ok(db)
}
