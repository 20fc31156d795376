use super::setup_test_db;
use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};
use anyhow::Result;

#[tokio::test]
async fn test_connection_and_schema() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    db.execute(Statement::from_string(DatabaseBackend::Postgres, "SELECT 1".to_owned())).await?;

    for table in ["users", "profiles", "addresses", "categories", "jobs", "favorites", "requests", "ratings", "banners", "verifications"] {
        let row = db
            .query_one(Statement::from_sql_and_values(
                DatabaseBackend::Postgres,
                "SELECT COUNT(*)::int AS n FROM information_schema.tables WHERE table_name = $1",
                [table.into()],
            ))
            .await?
            .expect("count row");
        let n: i32 = row.try_get("", "n")?;
        assert_eq!(n, 1, "missing table {table}");
    }
    Ok(())
}
