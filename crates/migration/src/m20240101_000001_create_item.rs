//! Create `item` table.
//! One row per item; every domain column is nullable and unconstrained.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Item::Table)
                    .if_not_exists()
                    .col(uuid(Item::Id).primary_key())
                    .col(string_null(Item::Name))
                    .col(text_null(Item::Desc))
                    .col(double_null(Item::Qty))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Item::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Item {
    Table,
    Id,
    Name,
    Desc,
    Qty,
}
