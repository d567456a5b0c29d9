use chrono::{Datelike, TimeZone, Utc};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait,
};
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::Serialize;

use models::{client, payment, transaction};

use crate::errors::ServiceError;

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub database: &'static str,
    pub clients: u64,
    pub env: String,
}

#[derive(Debug, Serialize)]
pub struct Metric {
    pub value: f64,
    pub trend: String,
}

#[derive(Debug, Serialize)]
pub struct PendingMetric {
    pub value: f64,
}

#[derive(Debug, Serialize)]
pub struct ClientCount {
    pub value: u64,
}

#[derive(Debug, Serialize)]
pub struct Stats {
    pub revenue: Metric,
    pub received: Metric,
    pub pending: PendingMetric,
    pub clients: ClientCount,
}

#[derive(Debug, FromQueryResult, Serialize)]
pub struct LedgerEntry {
    pub id: i64,
    pub client_id: i64,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: String,
    pub created_at: DateTimeWithTimeZone,
    pub client_name: Option<String>,
    pub company: Option<String>,
}

/// Liveness probe with a client count; a database error here is surfaced to
/// the handler, which reports failure status.
pub async fn health(db: &DatabaseConnection) -> Result<HealthReport, ServiceError> {
    let clients = client::Entity::find().count(db).await.map_err(ServiceError::db)?;
    let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
    Ok(HealthReport { status: "ok", database: "connected", clients, env })
}

/// Trend against the pre-month cohort. This compares current totals against
/// clients created before this calendar month, a deliberately coarse proxy
/// rather than a true month-over-month delta.
fn trend(current: f64, previous: f64) -> String {
    if previous == 0.0 {
        return "+100%".to_string();
    }
    let pct = (current - previous) / previous * 100.0;
    format!("{pct:+.1}%")
}

/// Aggregate dashboard figures across all payment rows.
pub async fn stats(db: &DatabaseConnection) -> Result<Stats, ServiceError> {
    let (revenue, received, pending): (Option<f64>, Option<f64>, Option<f64>) =
        payment::Entity::find()
            .select_only()
            .column_as(payment::Column::TotalAmount.sum(), "revenue")
            .column_as(payment::Column::AdvancePaid.sum(), "received")
            .column_as(payment::Column::RemainingBalance.sum(), "pending")
            .into_tuple()
            .one(db)
            .await
            .map_err(ServiceError::db)?
            .unwrap_or_default();

    let now = Utc::now();
    // First midnight of a UTC month always resolves
    let month_start = Utc
        .with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
        .single()
        .unwrap_or(now);

    let (prev_revenue, prev_received): (Option<f64>, Option<f64>) = payment::Entity::find()
        .select_only()
        .column_as(payment::Column::TotalAmount.sum(), "revenue")
        .column_as(payment::Column::AdvancePaid.sum(), "received")
        .join(JoinType::InnerJoin, payment::Relation::Client.def())
        .filter(client::Column::CreatedAt.lt(month_start))
        .into_tuple()
        .one(db)
        .await
        .map_err(ServiceError::db)?
        .unwrap_or_default();

    let clients = client::Entity::find().count(db).await.map_err(ServiceError::db)?;

    let revenue = revenue.unwrap_or(0.0);
    let received = received.unwrap_or(0.0);
    Ok(Stats {
        revenue: Metric { value: revenue, trend: trend(revenue, prev_revenue.unwrap_or(0.0)) },
        received: Metric { value: received, trend: trend(received, prev_received.unwrap_or(0.0)) },
        pending: PendingMetric { value: pending.unwrap_or(0.0) },
        clients: ClientCount { value: clients },
    })
}

/// Every ledger entry joined with client name and company, newest first.
pub async fn list_transactions(db: &DatabaseConnection) -> Result<Vec<LedgerEntry>, ServiceError> {
    transaction::Entity::find()
        .select_only()
        .column(transaction::Column::Id)
        .column(transaction::Column::ClientId)
        .column(transaction::Column::Amount)
        .column_as(transaction::Column::Kind, "kind")
        .column(transaction::Column::CreatedAt)
        .column_as(client::Column::Name, "client_name")
        .column_as(client::Column::Company, "company")
        .join(JoinType::LeftJoin, transaction::Relation::Client.def())
        .order_by_desc(transaction::Column::CreatedAt)
        .order_by_desc(transaction::Column::Id)
        .into_model::<LedgerEntry>()
        .all(db)
        .await
        .map_err(ServiceError::db)
}
