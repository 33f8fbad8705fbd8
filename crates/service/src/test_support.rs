#![cfg(test)]
use std::sync::Arc;

use common::FieldCipher;
use configs::DatabaseConfig;
use migration::MigratorTrait;
use models::db::connect_with_config;
use sea_orm::DatabaseConnection;

pub const TEST_KEY: &[u8; 32] = b"0123456789abcdef0123456789abcdef";

/// Fresh in-memory database per test with every migration applied.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let cfg = DatabaseConfig { url: "sqlite::memory:".into(), ..DatabaseConfig::default() };
    let db = connect_with_config(&cfg).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

pub fn cipher() -> Arc<FieldCipher> {
    Arc::new(FieldCipher::new(TEST_KEY).expect("32-byte key"))
}
