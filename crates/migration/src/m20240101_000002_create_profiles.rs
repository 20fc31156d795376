//! Create `profiles` table: one personal-details row per user.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Profiles::Table)
                    .if_not_exists()
                    .col(pk_auto(Profiles::Id))
                    .col(integer(Profiles::UserId).unique_key().not_null())
                    .col(string_len(Profiles::FirstName, 128).not_null())
                    .col(string_len(Profiles::LastName, 128).not_null())
                    .col(string_len(Profiles::Gender, 32).not_null())
                    .col(string_len(Profiles::Dob, 32).not_null())
                    .col(text(Profiles::ProfilePhoto).not_null())
                    .col(timestamp_with_time_zone(Profiles::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Profiles::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_profiles_user")
                            .from(Profiles::Table, Profiles::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Profiles::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Profiles {
    Table,
    Id,
    UserId,
    FirstName,
    LastName,
    Gender,
    Dob,
    ProfilePhoto,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Users { Table, Id }
