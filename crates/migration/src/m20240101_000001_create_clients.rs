//! Create `clients` table.
//!
//! Root entity; services, payments, tasks and transactions reference it.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Clients::Table)
                    .if_not_exists()
                    .col(big_integer(Clients::Id).auto_increment().primary_key())
                    .col(string_len(Clients::Name, 255).not_null())
                    .col(ColumnDef::new(Clients::Email).string_len(255).null())
                    .col(ColumnDef::new(Clients::Phone).string_len(64).null())
                    .col(ColumnDef::new(Clients::Company).string_len(255).null())
                    .col(string_len(Clients::Status, 32).not_null().default("active"))
                    .col(timestamp_with_time_zone(Clients::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Clients::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Clients { Table, Id, Name, Email, Phone, Company, Status, CreatedAt }
