use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, Order, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use sea_orm::prelude::{DateTimeWithTimeZone, Expr};
use serde::{Deserialize, Serialize};

use models::{client, payment, service_item, task};

use crate::errors::ServiceError;

#[derive(Debug, Clone, Deserialize)]
pub struct NewClient {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub managed_by: Option<String>,
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default)]
    pub advance_paid: f64,
}

/// Partial update; absent fields are left untouched. A present `services`
/// list replaces the client's whole service set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub notes: Option<String>,
    pub managed_by: Option<String>,
    pub services: Option<Vec<String>>,
}

/// One row of the client listing: client scalars with the payment totals and
/// pending-task count flattened in, and service types as a string array.
#[derive(Debug, Clone, Serialize)]
pub struct ClientOverview {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub notes: Option<String>,
    pub managed_by: Option<String>,
    pub status: String,
    pub created_at: DateTimeWithTimeZone,
    pub services: Vec<String>,
    pub total_amount: f64,
    pub advance_paid: f64,
    pub remaining_balance: f64,
    pub pending_tasks: i64,
}

/// List every client, newest first, with services, payment totals and
/// pending-task counts attached.
pub async fn list_clients(db: &DatabaseConnection) -> Result<Vec<ClientOverview>, ServiceError> {
    let clients = client::Entity::find()
        .order_by_desc(client::Column::CreatedAt)
        .order_by(client::Column::Id, Order::Desc)
        .all(db)
        .await
        .map_err(ServiceError::db)?;

    let mut services_by_client: HashMap<i64, Vec<String>> = HashMap::new();
    for s in service_item::Entity::find().all(db).await.map_err(ServiceError::db)? {
        services_by_client.entry(s.client_id).or_default().push(s.service_type);
    }

    // Nominally one payment row per client; the first wins if duplicates exist
    let mut payment_by_client: HashMap<i64, payment::Model> = HashMap::new();
    for p in payment::Entity::find().all(db).await.map_err(ServiceError::db)? {
        payment_by_client.entry(p.client_id).or_insert(p);
    }

    let pending: Vec<(i64, i64)> = task::Entity::find()
        .select_only()
        .column(task::Column::ClientId)
        .column_as(task::Column::Id.count(), "pending")
        .filter(task::Column::Status.eq("pending"))
        .group_by(task::Column::ClientId)
        .into_tuple()
        .all(db)
        .await
        .map_err(ServiceError::db)?;
    let pending_by_client: HashMap<i64, i64> = pending.into_iter().collect();

    let overviews = clients
        .into_iter()
        .map(|c| {
            let p = payment_by_client.remove(&c.id);
            ClientOverview {
                services: services_by_client.remove(&c.id).unwrap_or_default(),
                total_amount: p.as_ref().map(|p| p.total_amount).unwrap_or(0.0),
                advance_paid: p.as_ref().map(|p| p.advance_paid).unwrap_or(0.0),
                remaining_balance: p.as_ref().map(|p| p.remaining_balance).unwrap_or(0.0),
                pending_tasks: pending_by_client.get(&c.id).copied().unwrap_or(0),
                id: c.id,
                name: c.name,
                email: c.email,
                phone: c.phone,
                company: c.company,
                notes: c.notes,
                managed_by: c.managed_by,
                status: c.status,
                created_at: c.created_at,
            }
        })
        .collect();
    Ok(overviews)
}

/// Create a client with its service rows and its payment row in one
/// transaction; a client never exists without a payment row.
pub async fn create_client(db: &DatabaseConnection, input: NewClient) -> Result<i64, ServiceError> {
    client::validate_name(&input.name)?;

    let txn = db.begin().await.map_err(ServiceError::db)?;
    let now = Utc::now();

    let created = client::ActiveModel {
        name: Set(input.name),
        email: Set(input.email),
        phone: Set(input.phone),
        company: Set(input.company),
        notes: Set(input.notes),
        managed_by: Set(input.managed_by),
        status: Set("active".into()),
        created_at: Set(now.into()),
        ..Default::default()
    }
    .insert(&txn)
    .await
    .map_err(ServiceError::db)?;

    for service_type in input.services {
        service_item::ActiveModel {
            client_id: Set(created.id),
            service_type: Set(service_type),
            price: Set(0.0),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(ServiceError::db)?;
    }

    payment::ActiveModel {
        client_id: Set(created.id),
        total_amount: Set(input.total_amount),
        advance_paid: Set(input.advance_paid),
        remaining_balance: Set(input.total_amount - input.advance_paid),
        last_updated: Set(now.into()),
        ..Default::default()
    }
    .insert(&txn)
    .await
    .map_err(ServiceError::db)?;

    txn.commit().await.map_err(ServiceError::db)?;
    tracing::info!(client_id = created.id, "client created");
    Ok(created.id)
}

/// Patch client scalars; when a services list is given, delete the existing
/// rows and reinsert the supplied list (full replace, never a diff).
pub async fn update_client(
    db: &DatabaseConnection,
    id: i64,
    patch: ClientPatch,
) -> Result<(), ServiceError> {
    if let Some(name) = &patch.name {
        client::validate_name(name)?;
    }

    let txn = db.begin().await.map_err(ServiceError::db)?;

    let mut update = client::Entity::update_many().filter(client::Column::Id.eq(id));
    if let Some(name) = patch.name {
        update = update.col_expr(client::Column::Name, Expr::value(name));
    }
    if let Some(email) = patch.email {
        update = update.col_expr(client::Column::Email, Expr::value(email));
    }
    if let Some(phone) = patch.phone {
        update = update.col_expr(client::Column::Phone, Expr::value(phone));
    }
    if let Some(company) = patch.company {
        update = update.col_expr(client::Column::Company, Expr::value(company));
    }
    if let Some(notes) = patch.notes {
        update = update.col_expr(client::Column::Notes, Expr::value(notes));
    }
    if let Some(managed_by) = patch.managed_by {
        update = update.col_expr(client::Column::ManagedBy, Expr::value(managed_by));
    }
    update.exec(&txn).await.map_err(ServiceError::db)?;

    if let Some(services) = patch.services {
        service_item::Entity::delete_many()
            .filter(service_item::Column::ClientId.eq(id))
            .exec(&txn)
            .await
            .map_err(ServiceError::db)?;
        for service_type in services {
            service_item::ActiveModel {
                client_id: Set(id),
                service_type: Set(service_type),
                price: Set(0.0),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(ServiceError::db)?;
        }
    }

    txn.commit().await.map_err(ServiceError::db)?;
    Ok(())
}

/// Delete a client; services, payments, tasks and ledger rows go with it
/// through the cascading foreign keys.
pub async fn delete_client(db: &DatabaseConnection, id: i64) -> Result<(), ServiceError> {
    client::Entity::delete_by_id(id).exec(db).await.map_err(ServiceError::db)?;
    Ok(())
}
