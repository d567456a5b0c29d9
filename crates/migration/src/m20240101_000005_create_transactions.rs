//! Create `transactions` table with FK to `clients`.
//!
//! Append-only ledger; rows are written only when a strictly positive
//! amount is added to a payment. The cascade means the ledger follows its
//! client out of existence, which also keeps restore from ever having to
//! touch this table directly.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Transactions::Table)
                    .if_not_exists()
                    .col(big_integer(Transactions::Id).auto_increment().primary_key())
                    .col(big_integer(Transactions::ClientId).not_null())
                    .col(double(Transactions::Amount).not_null())
                    .col(string_len(Transactions::Type, 32).not_null().default("payment"))
                    .col(timestamp_with_time_zone(Transactions::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transactions_client")
                            .from(Transactions::Table, Transactions::ClientId)
                            .to(Clients::Table, Clients::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Transactions::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Transactions { Table, Id, ClientId, Amount, Type, CreatedAt }

#[derive(DeriveIden)]
enum Clients { Table, Id }
