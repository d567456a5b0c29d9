//! Create `tasks` table with FK to `clients`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Tasks::Table)
                    .if_not_exists()
                    .col(big_integer(Tasks::Id).auto_increment().primary_key())
                    .col(big_integer(Tasks::ClientId).not_null())
                    .col(string_len(Tasks::Title, 255).not_null())
                    // Free-form text date; the original UI sent plain strings
                    .col(ColumnDef::new(Tasks::DueDate).string_len(64).null())
                    .col(string_len(Tasks::Status, 32).not_null().default("pending"))
                    .col(timestamp_with_time_zone(Tasks::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tasks_client")
                            .from(Tasks::Table, Tasks::ClientId)
                            .to(Clients::Table, Clients::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Tasks::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Tasks { Table, Id, ClientId, Title, DueDate, Status, CreatedAt }

#[derive(DeriveIden)]
enum Clients { Table, Id }
