#![cfg(test)]
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;

/// Fresh, migrated in-memory SQLite database; each call gets its own.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let db = models::db::connect("sqlite::memory:").await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}
