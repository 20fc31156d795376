//! Create `users` table.
//!
//! Phone, email and username are unique. Users created through OTP or
//! Google sign-in have no password.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(pk_auto(Users::Id))
                    .col(string_len(Users::Username, 64).unique_key().not_null())
                    .col(string_len(Users::Phone, 32).unique_key().not_null())
                    .col(string_len(Users::Email, 255).unique_key().not_null())
                    .col(ColumnDef::new(Users::Password).string_len(255).null())
                    .col(string_len(Users::UserType, 16).not_null())
                    .col(boolean(Users::Verification).not_null().default(false))
                    .col(string_len(Users::Status, 32).not_null().default("newuser"))
                    .col(ColumnDef::new(Users::ProfilePhoto).text().null())
                    .col(timestamp_with_time_zone(Users::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Users::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Users::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Username,
    Phone,
    Email,
    Password,
    UserType,
    Verification,
    Status,
    ProfilePhoto,
    CreatedAt,
    UpdatedAt,
}
