//! Create `ratings` table: a user rating a worker.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Ratings::Table)
                    .if_not_exists()
                    .col(pk_auto(Ratings::Id))
                    .col(integer(Ratings::WorkerId).not_null())
                    .col(integer(Ratings::UserId).not_null())
                    .col(integer(Ratings::Rating).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ratings_worker")
                            .from(Ratings::Table, Ratings::WorkerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ratings_user")
                            .from(Ratings::Table, Ratings::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Ratings::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Ratings { Table, Id, WorkerId, UserId, Rating }

#[derive(DeriveIden)]
enum Users { Table, Id }
