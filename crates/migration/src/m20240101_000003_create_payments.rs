//! Create `payments` table with FK to `clients`.
//!
//! Nominally one row per client; the application maintains
//! remaining_balance = total_amount - advance_paid.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Payments::Table)
                    .if_not_exists()
                    .col(big_integer(Payments::Id).auto_increment().primary_key())
                    .col(big_integer(Payments::ClientId).not_null())
                    .col(double(Payments::TotalAmount).not_null().default(0.0))
                    .col(double(Payments::AdvancePaid).not_null().default(0.0))
                    .col(double(Payments::RemainingBalance).not_null().default(0.0))
                    .col(timestamp_with_time_zone(Payments::LastUpdated).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payments_client")
                            .from(Payments::Table, Payments::ClientId)
                            .to(Clients::Table, Clients::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Payments::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Payments { Table, Id, ClientId, TotalAmount, AdvancePaid, RemainingBalance, LastUpdated }

#[derive(DeriveIden)]
enum Clients { Table, Id }
