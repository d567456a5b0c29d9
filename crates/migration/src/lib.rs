//! Migrator registering table migrations in dependency order.
//!
//! The profile-column and assigned_to patches are additive follow-ups so a
//! database created from an older history is upgraded in place without data
//! loss. Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_clients;
mod m20240101_000002_create_services;
mod m20240101_000003_create_payments;
mod m20240101_000004_create_tasks;
mod m20240101_000005_create_transactions;
mod m20240101_000006_add_client_profile_columns;
mod m20240101_000007_add_task_assigned_to;
mod m20240101_000008_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_clients::Migration),
            Box::new(m20240101_000002_create_services::Migration),
            Box::new(m20240101_000003_create_payments::Migration),
            Box::new(m20240101_000004_create_tasks::Migration),
            Box::new(m20240101_000005_create_transactions::Migration),
            Box::new(m20240101_000006_add_client_profile_columns::Migration),
            Box::new(m20240101_000007_add_task_assigned_to::Migration),
            // Indexes should always be applied last
            Box::new(m20240101_000008_add_indexes::Migration),
        ]
    }
}
