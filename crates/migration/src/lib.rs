//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_users;
mod m20240101_000002_create_profiles;
mod m20240101_000003_create_addresses;
mod m20240101_000004_create_categories;
mod m20240101_000005_create_jobs;
mod m20240101_000006_create_favorites;
mod m20240101_000007_create_requests;
mod m20240101_000008_create_ratings;
mod m20240101_000009_create_banners;
mod m20240101_000010_create_verifications;
mod m20240101_000099_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_users::Migration),
            Box::new(m20240101_000002_create_profiles::Migration),
            Box::new(m20240101_000003_create_addresses::Migration),
            Box::new(m20240101_000004_create_categories::Migration),
            Box::new(m20240101_000005_create_jobs::Migration),
            Box::new(m20240101_000006_create_favorites::Migration),
            Box::new(m20240101_000007_create_requests::Migration),
            Box::new(m20240101_000008_create_ratings::Migration),
            Box::new(m20240101_000009_create_banners::Migration),
            Box::new(m20240101_000010_create_verifications::Migration),
            // Indexes should always be applied last
            Box::new(m20240101_000099_add_indexes::Migration),
        ]
    }
}
