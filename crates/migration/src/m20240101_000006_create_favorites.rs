//! Create `favorites` table (user × job).
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Favorites::Table)
                    .if_not_exists()
                    .col(pk_auto(Favorites::Id))
                    .col(integer(Favorites::UserId).not_null())
                    .col(integer(Favorites::JobId).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_favorites_user")
                            .from(Favorites::Table, Favorites::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_favorites_job")
                            .from(Favorites::Table, Favorites::JobId)
                            .to(Jobs::Table, Jobs::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Favorites::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Favorites { Table, Id, UserId, JobId }

#[derive(DeriveIden)]
enum Users { Table, Id }

#[derive(DeriveIden)]
enum Jobs { Table, Id }
