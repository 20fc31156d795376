/// Connection and migration tests
pub mod db_tests;


use crate::db::connect;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;

/// Connect and migrate, or `None` when the database is unavailable or
/// `SKIP_DB_TESTS` is set.
pub(crate) async fn setup_test_db() -> Option<DatabaseConnection> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    let db = match connect().await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("skipping db test: {e}");
            return None;
        }
    };
    migration::Migrator::up(&db, None).await.ok()?;
    Some(db)
}
