use anyhow::Result;
use migration::MigratorTrait;
use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

use super::setup_test_db;

#[tokio::test]
async fn test_migrations_apply_and_report_status() -> Result<()> {
    let db = setup_test_db().await?;
    assert_eq!(db.get_database_backend(), DatabaseBackend::Sqlite);

    let pending = migration::Migrator::get_pending_migrations(&db).await?;
    assert!(pending.is_empty());

    for table in ["user", "car", "accessory", "car_image", "rental_request"] {
        let row = db
            .query_one(Statement::from_sql_and_values(
                DatabaseBackend::Sqlite,
                "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?",
                [table.into()],
            ))
            .await?;
        assert!(row.is_some(), "missing table {}", table);
    }
    Ok(())
}

#[tokio::test]
async fn test_migrations_roll_back_cleanly() -> Result<()> {
    let db = setup_test_db().await?;
    migration::Migrator::down(&db, None).await?;
    let row = db
        .query_one(Statement::from_string(
            DatabaseBackend::Sqlite,
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'car'",
        ))
        .await?;
    assert!(row.is_none());
    Ok(())
}
