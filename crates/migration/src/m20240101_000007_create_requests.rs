//! Create `requests` table: a user asking for a job at one of their addresses.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Requests::Table)
                    .if_not_exists()
                    .col(pk_auto(Requests::Id))
                    .col(integer(Requests::UserId).not_null())
                    .col(integer(Requests::JobId).not_null())
                    .col(integer(Requests::AddressId).not_null())
                    .col(string_len(Requests::Status, 32).not_null().default("pending"))
                    .col(ColumnDef::new(Requests::Date).string_len(32).null())
                    .col(ColumnDef::new(Requests::BidAmount).integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_requests_user")
                            .from(Requests::Table, Requests::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_requests_job")
                            .from(Requests::Table, Requests::JobId)
                            .to(Jobs::Table, Jobs::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_requests_address")
                            .from(Requests::Table, Requests::AddressId)
                            .to(Addresses::Table, Addresses::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Requests::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Requests { Table, Id, UserId, JobId, AddressId, Status, Date, BidAmount }

#[derive(DeriveIden)]
enum Users { Table, Id }

#[derive(DeriveIden)]
enum Jobs { Table, Id }

#[derive(DeriveIden)]
enum Addresses { Table, Id }
