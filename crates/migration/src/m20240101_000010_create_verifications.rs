//! Create `verifications` table holding one-time email codes.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Verifications::Table)
                    .if_not_exists()
                    .col(pk_auto(Verifications::Id))
                    .col(string_len(Verifications::Email, 255).not_null())
                    .col(string_len(Verifications::Code, 16).not_null())
                    .col(timestamp_with_time_zone(Verifications::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Verifications::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Verifications { Table, Id, Email, Code, CreatedAt }
