//! Create `jobs` table.
//!
//! A job belongs to a worker (a row in `users`) and to a category.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Jobs::Table)
                    .if_not_exists()
                    .col(pk_auto(Jobs::Id))
                    .col(integer(Jobs::WorkerId).not_null())
                    .col(integer(Jobs::CategoryId).not_null())
                    .col(string_len(Jobs::Experience, 128).not_null())
                    .col(text(Jobs::Description).not_null())
                    .col(integer(Jobs::FullDayWage).not_null())
                    .col(integer(Jobs::HalfDayWage).not_null())
                    .col(boolean(Jobs::OpenWork).not_null().default(true))
                    .col(boolean(Jobs::Priority).not_null().default(false))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_jobs_worker")
                            .from(Jobs::Table, Jobs::WorkerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_jobs_category")
                            .from(Jobs::Table, Jobs::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Jobs::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Jobs {
    Table,
    Id,
    WorkerId,
    CategoryId,
    Experience,
    Description,
    FullDayWage,
    HalfDayWage,
    OpenWork,
    Priority,
}

#[derive(DeriveIden)]
enum Users { Table, Id }

#[derive(DeriveIden)]
enum Categories { Table, Id }
