//! Create `services` table with FK to `clients`.
//!
//! Many rows per client; duplicates of (client_id, service_type) are allowed
//! on purpose, so no unique constraint here.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Services::Table)
                    .if_not_exists()
                    .col(big_integer(Services::Id).auto_increment().primary_key())
                    .col(big_integer(Services::ClientId).not_null())
                    .col(string_len(Services::ServiceType, 255).not_null())
                    .col(double(Services::Price).not_null().default(0.0))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_services_client")
                            .from(Services::Table, Services::ClientId)
                            .to(Clients::Table, Clients::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Services::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Services { Table, Id, ClientId, ServiceType, Price }

#[derive(DeriveIden)]
enum Clients { Table, Id }
