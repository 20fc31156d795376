use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Banners::Table)
                    .if_not_exists()
                    .col(pk_auto(Banners::Id))
                    .col(text(Banners::Image).not_null())
                    .col(text(Banners::Deeplink).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Banners::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Banners { Table, Id, Image, Deeplink }
