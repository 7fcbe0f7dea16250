//! Create `clientes` table.
//!
//! Column names follow the canonical client keys (`nome`, `idade`, `uf`), so a
//! fresh store never needs the casing fallbacks; legacy stores still might.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Clientes::Table)
                    .if_not_exists()
                    .col(pk_auto(Clientes::Id))
                    .col(string_len(Clientes::Nome, 120).not_null())
                    .col(integer(Clientes::Idade).not_null())
                    .col(string_len(Clientes::Uf, 2).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Clientes::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Clientes { Table, Id, Nome, Idade, Uf }
