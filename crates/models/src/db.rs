use std::time::Duration;

use configs::DatabaseConfig;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use tracing::info;

/// Connect with pool defaults, e.g. for tooling and tests.
pub async fn connect(url: &str) -> anyhow::Result<DatabaseConnection> {
    let cfg = DatabaseConfig { url: url.to_string(), ..DatabaseConfig::default() };
    connect_with_config(&cfg).await
}

/// Build the process-wide connection pool from `[database]` settings.
pub async fn connect_with_config(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let mut opt = ConnectOptions::new(cfg.url.clone());
    // every pooled connection to `sqlite::memory:` is its own empty database
    let max_connections = if is_in_memory_sqlite(&cfg.url) { 1 } else { cfg.max_connections };
    opt.max_connections(max_connections)
        .min_connections(cfg.min_connections.min(max_connections))
        .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(cfg.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(cfg.max_lifetime_secs))
        .sqlx_logging(cfg.sqlx_logging);
    let db = Database::connect(opt).await?;
    info!(backend = ?db.get_database_backend(), max_connections, "database pool ready");
    Ok(db)
}

fn is_in_memory_sqlite(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    lower.starts_with("sqlite:") && (lower.contains(":memory:") || lower.contains("mode=memory"))
}
