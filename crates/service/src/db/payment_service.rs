use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use serde::Deserialize;

use models::{payment, transaction};

use crate::errors::ServiceError;

/// Caller supplies the new absolute `advance_paid`, not an increment.
/// `amount_added` is an independent ledger side effect; the two values are
/// deliberately not cross-validated against each other.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentUpdate {
    pub advance_paid: f64,
    #[serde(default)]
    pub amount_added: Option<f64>,
}

/// Update a client's payment record. The only not-found case in the API:
/// a client without a payment row yields `ServiceError::NotFound`.
pub async fn update_payment(
    db: &DatabaseConnection,
    client_id: i64,
    input: PaymentUpdate,
) -> Result<(), ServiceError> {
    let existing = payment::Entity::find()
        .filter(payment::Column::ClientId.eq(client_id))
        .one(db)
        .await
        .map_err(ServiceError::db)?
        .ok_or_else(|| ServiceError::not_found("payment record"))?;

    let txn = db.begin().await.map_err(ServiceError::db)?;
    let now = Utc::now();

    // total_amount is unchanged; remaining tracks the new advance
    let remaining = existing.total_amount - input.advance_paid;
    let mut am: payment::ActiveModel = existing.into();
    am.advance_paid = Set(input.advance_paid);
    am.remaining_balance = Set(remaining);
    am.last_updated = Set(now.into());
    am.update(&txn).await.map_err(ServiceError::db)?;

    if let Some(added) = input.amount_added {
        if added > 0.0 {
            transaction::ActiveModel {
                client_id: Set(client_id),
                amount: Set(added),
                kind: Set(transaction::DEFAULT_KIND.into()),
                created_at: Set(now.into()),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(ServiceError::db)?;
        }
    }

    txn.commit().await.map_err(ServiceError::db)?;
    tracing::info!(client_id, advance_paid = input.advance_paid, "payment record updated");
    Ok(())
}
