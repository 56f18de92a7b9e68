use std::time::Duration;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr};
use tracing::info;

pub use configs::DatabaseConfig;

/// Open a pooled connection using the `[database]` section.
///
/// In-memory SQLite databases live only as long as their connection, so
/// idle and lifetime recycling are disabled for them.
pub async fn connect_with_config(cfg: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(cfg.url.clone());
    opt.max_connections(cfg.max_connections)
        .min_connections(cfg.min_connections)
        .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .sqlx_logging(cfg.sqlx_logging);
    if !is_in_memory(&cfg.url) {
        opt.idle_timeout(Duration::from_secs(cfg.idle_timeout_secs))
            .max_lifetime(Duration::from_secs(cfg.max_lifetime_secs));
    }

    let db = Database::connect(opt).await?;
    info!(backend = ?db.get_database_backend(), max_connections = cfg.max_connections, "database connected");
    Ok(db)
}

fn is_in_memory(url: &str) -> bool {
    url.starts_with("sqlite::memory:") || url.contains("mode=memory")
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::DbBackend;

    #[tokio::test]
    async fn connects_to_in_memory_sqlite() -> Result<(), DbErr> {
        let cfg = DatabaseConfig { url: "sqlite::memory:".into(), max_connections: 1, min_connections: 1, ..Default::default() };
        let db = connect_with_config(&cfg).await?;
        assert_eq!(db.get_database_backend(), DbBackend::Sqlite);
        assert!(is_in_memory(&cfg.url));
        assert!(!is_in_memory("sqlite://carwash.db?mode=rwc"));
        Ok(())
    }
}
