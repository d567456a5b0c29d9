//! Additive patch: `clients.notes` and `clients.managed_by`.
//!
//! These columns arrived after the first deployments; keeping them as a
//! separate step upgrades older database files in place. SQLite allows one
//! added column per ALTER, hence two statements.
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Clients::Table)
                    .add_column(ColumnDef::new(Clients::Notes).text().null())
                    .to_owned(),
            )
            .await?;
        manager
            .alter_table(
                Table::alter()
                    .table(Clients::Table)
                    .add_column(ColumnDef::new(Clients::ManagedBy).string_len(255).null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter().table(Clients::Table).drop_column(Clients::Notes).to_owned(),
            )
            .await?;
        manager
            .alter_table(
                Table::alter().table(Clients::Table).drop_column(Clients::ManagedBy).to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum Clients { Table, Notes, ManagedBy }
