use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Addresses: lookup by owner
        manager
            .create_index(
                Index::create()
                    .name("idx_addresses_user")
                    .table(Addresses::Table)
                    .col(Addresses::UserId)
                    .to_owned(),
            )
            .await?;

        // Jobs: browse by category, list by worker
        manager
            .create_index(
                Index::create()
                    .name("idx_jobs_category")
                    .table(Jobs::Table)
                    .col(Jobs::CategoryId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_jobs_worker")
                    .table(Jobs::Table)
                    .col(Jobs::WorkerId)
                    .to_owned(),
            )
            .await?;

        // Favorites: composite unique (user_id, job_id)
        manager
            .create_index(
                Index::create()
                    .name("uniq_favorites_user_job")
                    .table(Favorites::Table)
                    .col(Favorites::UserId)
                    .col(Favorites::JobId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_requests_user")
                    .table(Requests::Table)
                    .col(Requests::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_ratings_worker")
                    .table(Ratings::Table)
                    .col(Ratings::WorkerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_verifications_email")
                    .table(Verifications::Table)
                    .col(Verifications::Email)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_index(Index::drop().name("idx_verifications_email").table(Verifications::Table).to_owned()).await?;
        manager.drop_index(Index::drop().name("idx_ratings_worker").table(Ratings::Table).to_owned()).await?;
        manager.drop_index(Index::drop().name("idx_requests_user").table(Requests::Table).to_owned()).await?;
        manager.drop_index(Index::drop().name("uniq_favorites_user_job").table(Favorites::Table).to_owned()).await?;
        manager.drop_index(Index::drop().name("idx_jobs_worker").table(Jobs::Table).to_owned()).await?;
        manager.drop_index(Index::drop().name("idx_jobs_category").table(Jobs::Table).to_owned()).await?;
        manager.drop_index(Index::drop().name("idx_addresses_user").table(Addresses::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Addresses { Table, UserId }

#[derive(DeriveIden)]
enum Jobs { Table, CategoryId, WorkerId }

#[derive(DeriveIden)]
enum Favorites { Table, UserId, JobId }

#[derive(DeriveIden)]
enum Requests { Table, UserId }

#[derive(DeriveIden)]
enum Ratings { Table, WorkerId }

#[derive(DeriveIden)]
enum Verifications { Table, Email }
