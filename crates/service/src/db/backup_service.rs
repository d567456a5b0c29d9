use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, TransactionTrait,
};
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};

use models::{client, payment, service_item, task};

use crate::errors::ServiceError;

pub const BACKUP_VERSION: &str = "1.0";

/// Full-table snapshot of the four primary tables. The transaction ledger is
/// excluded by design; `timestamp` and `version` are stamped on export and
/// ignored on restore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupDocument {
    pub clients: Vec<client::Model>,
    pub services: Vec<service_item::Model>,
    pub payments: Vec<payment::Model>,
    pub tasks: Vec<task::Model>,
    #[serde(default)]
    pub timestamp: Option<DateTimeWithTimeZone>,
    #[serde(default)]
    pub version: Option<String>,
}

/// Read-only export of every row in clients/services/payments/tasks.
pub async fn export_backup(db: &DatabaseConnection) -> Result<BackupDocument, ServiceError> {
    Ok(BackupDocument {
        clients: client::Entity::find().all(db).await.map_err(ServiceError::db)?,
        services: service_item::Entity::find().all(db).await.map_err(ServiceError::db)?,
        payments: payment::Entity::find().all(db).await.map_err(ServiceError::db)?,
        tasks: task::Entity::find().all(db).await.map_err(ServiceError::db)?,
        timestamp: Some(Utc::now().into()),
        version: Some(BACKUP_VERSION.into()),
    })
}

/// Destructive replace: wipe the four tables in dependency order, then
/// reinsert the snapshot rows with their original ids. The transactions
/// table is never touched here; it empties through the client FK cascade.
pub async fn restore_backup(
    db: &DatabaseConnection,
    doc: BackupDocument,
) -> Result<(), ServiceError> {
    tracing::info!(
        clients = doc.clients.len(),
        services = doc.services.len(),
        payments = doc.payments.len(),
        tasks = doc.tasks.len(),
        "restoring snapshot"
    );
    let txn = db.begin().await.map_err(ServiceError::db)?;

    task::Entity::delete_many().exec(&txn).await.map_err(ServiceError::db)?;
    payment::Entity::delete_many().exec(&txn).await.map_err(ServiceError::db)?;
    service_item::Entity::delete_many().exec(&txn).await.map_err(ServiceError::db)?;
    client::Entity::delete_many().exec(&txn).await.map_err(ServiceError::db)?;

    // reset_all turns the Unchanged snapshot values into Set, so the
    // original surrogate ids are written back verbatim
    for row in doc.clients {
        row.into_active_model().reset_all().insert(&txn).await.map_err(ServiceError::db)?;
    }
    for row in doc.services {
        row.into_active_model().reset_all().insert(&txn).await.map_err(ServiceError::db)?;
    }
    for row in doc.payments {
        row.into_active_model().reset_all().insert(&txn).await.map_err(ServiceError::db)?;
    }
    for row in doc.tasks {
        row.into_active_model().reset_all().insert(&txn).await.map_err(ServiceError::db)?;
    }

    txn.commit().await.map_err(ServiceError::db)?;
    Ok(())
}
