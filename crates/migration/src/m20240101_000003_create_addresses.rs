//! Create `addresses` table with FK to `users`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Addresses::Table)
                    .if_not_exists()
                    .col(pk_auto(Addresses::Id))
                    .col(integer(Addresses::UserId).not_null())
                    .col(string_len(Addresses::Category, 64).not_null())
                    .col(string_len(Addresses::MapCoordinates, 128).not_null())
                    .col(string_len(Addresses::HouseNumber, 64).not_null())
                    .col(string_len(Addresses::Floor, 32).not_null())
                    .col(string_len(Addresses::BlockOrTower, 64).not_null())
                    .col(string_len(Addresses::Landmark, 255).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_addresses_user")
                            .from(Addresses::Table, Addresses::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Addresses::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Addresses {
    Table,
    Id,
    UserId,
    Category,
    MapCoordinates,
    HouseNumber,
    Floor,
    BlockOrTower,
    Landmark,
}

#[derive(DeriveIden)]
enum Users { Table, Id }
