#![cfg(test)]
use tokio::sync::OnceCell;
use sea_orm::DatabaseConnection;
use migration::MigratorTrait;
use models::db::{connect_with_config, DatabaseConfig, DATABASE_URL};

// Ensure migrations run only once across the entire test process
static MIGRATED: OnceCell<bool> = OnceCell::const_new();

fn test_config() -> DatabaseConfig {
    DatabaseConfig {
        url: DATABASE_URL.clone(),
        min_connections: 1,
        connect_timeout_secs: 5,
        acquire_timeout_secs: 10,
        ..Default::default()
    }
}

/// Migrated connection, or `None` when `SKIP_DB_TESTS` is set or Postgres is unreachable.
pub async fn get_db() -> Option<DatabaseConnection> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    let migrated = *MIGRATED
        .get_or_init(|| async {
            match connect_with_config(&test_config()).await {
                Ok(db) => migration::Migrator::up(&db, None).await.is_ok(),
                Err(_) => false,
            }
        })
        .await;
    if !migrated {
        return None;
    }
    // Fresh connection for the current test's runtime
    connect_with_config(&test_config()).await.ok()
}
