use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Child tables: index on client_id for list/cascade paths
        manager
            .create_index(
                Index::create()
                    .name("idx_services_client")
                    .table(Services::Table)
                    .col(Services::ClientId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_payments_client")
                    .table(Payments::Table)
                    .col(Payments::ClientId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tasks_client")
                    .table(Tasks::Table)
                    .col(Tasks::ClientId)
                    .to_owned(),
            )
            .await?;

        // Ledger listing is newest-first
        manager
            .create_index(
                Index::create()
                    .name("idx_transactions_client")
                    .table(Transactions::Table)
                    .col(Transactions::ClientId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_transactions_created")
                    .table(Transactions::Table)
                    .col(Transactions::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_services_client").table(Services::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_payments_client").table(Payments::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_tasks_client").table(Tasks::Table).to_owned())
            .await?;
        manager
            .drop_index(
                Index::drop().name("idx_transactions_client").table(Transactions::Table).to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop().name("idx_transactions_created").table(Transactions::Table).to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum Services { Table, ClientId }

#[derive(DeriveIden)]
enum Payments { Table, ClientId }

#[derive(DeriveIden)]
enum Tasks { Table, ClientId }

#[derive(DeriveIden)]
enum Transactions { Table, ClientId, CreatedAt }
