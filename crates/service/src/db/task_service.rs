use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType,
    Order, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
};
use sea_orm::prelude::{DateTimeWithTimeZone, Expr};
use serde::{Deserialize, Serialize};

use models::{client, task};

use crate::errors::ServiceError;

#[derive(Debug, Clone, Deserialize)]
pub struct NewTask {
    pub client_id: i64,
    pub title: String,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
}

#[derive(Debug, Clone, FromQueryResult, Serialize)]
pub struct TaskRow {
    pub id: i64,
    pub client_id: i64,
    pub client_name: String,
    pub title: String,
    pub assigned_to: Option<String>,
    pub due_date: Option<String>,
    pub status: String,
    pub created_at: DateTimeWithTimeZone,
}

/// List tasks joined with their client's name, optionally restricted to one
/// client. Due dates sort ascending with unset dates last; newest creation
/// wins among equal due dates.
pub async fn list_tasks(
    db: &DatabaseConnection,
    client_id: Option<i64>,
) -> Result<Vec<TaskRow>, ServiceError> {
    let mut query = task::Entity::find()
        .select_only()
        .column(task::Column::Id)
        .column(task::Column::ClientId)
        .column(task::Column::Title)
        .column(task::Column::AssignedTo)
        .column(task::Column::DueDate)
        .column(task::Column::Status)
        .column(task::Column::CreatedAt)
        .column_as(client::Column::Name, "client_name")
        .join(JoinType::InnerJoin, task::Relation::Client.def())
        .order_by(task::Column::DueDate.is_null(), Order::Asc)
        .order_by_asc(task::Column::DueDate)
        .order_by_desc(task::Column::CreatedAt);
    if let Some(cid) = client_id {
        query = query.filter(task::Column::ClientId.eq(cid));
    }
    query.into_model::<TaskRow>().all(db).await.map_err(ServiceError::db)
}

/// Insert a task for a client; returns the new id.
pub async fn create_task(db: &DatabaseConnection, input: NewTask) -> Result<i64, ServiceError> {
    task::validate_title(&input.title)?;
    let created = task::ActiveModel {
        client_id: Set(input.client_id),
        title: Set(input.title),
        assigned_to: Set(input.assigned_to),
        due_date: Set(input.due_date),
        status: Set("pending".into()),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(ServiceError::db)?;
    Ok(created.id)
}

/// Set a task's status. Any string is accepted; updating a missing id is a
/// no-op, not an error.
pub async fn update_task_status(
    db: &DatabaseConnection,
    id: i64,
    status: String,
) -> Result<(), ServiceError> {
    task::Entity::update_many()
        .filter(task::Column::Id.eq(id))
        .col_expr(task::Column::Status, Expr::value(status))
        .exec(db)
        .await
        .map_err(ServiceError::db)?;
    Ok(())
}

pub async fn delete_task(db: &DatabaseConnection, id: i64) -> Result<(), ServiceError> {
    task::Entity::delete_by_id(id).exec(db).await.map_err(ServiceError::db)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::client_service::{create_client, NewClient};
    use crate::test_support::get_db;

    async fn seed_client(db: &DatabaseConnection, name: &str) -> Result<i64, anyhow::Error> {
        Ok(create_client(
            db,
            NewClient {
                name: name.into(),
                email: None,
                phone: None,
                company: None,
                notes: None,
                managed_by: None,
                services: vec![],
                total_amount: 0.0,
                advance_paid: 0.0,
            },
        )
        .await?)
    }

    #[tokio::test]
    async fn task_crud() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let cid = seed_client(&db, "taskful").await?;

        let id = create_task(
            &db,
            NewTask {
                client_id: cid,
                title: "send contract".into(),
                assigned_to: Some("lee".into()),
                due_date: Some("2024-06-01".into()),
            },
        )
        .await?;

        let rows = list_tasks(&db, None).await?;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].client_name, "taskful");
        assert_eq!(rows[0].status, "pending");

        update_task_status(&db, id, "done".into()).await?;
        let rows = list_tasks(&db, None).await?;
        assert_eq!(rows[0].status, "done");

        delete_task(&db, id).await?;
        assert!(list_tasks(&db, None).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn status_accepts_any_string_and_missing_id_is_noop() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let cid = seed_client(&db, "lenient").await?;
        let id = create_task(
            &db,
            NewTask { client_id: cid, title: "t".into(), assigned_to: None, due_date: None },
        )
        .await?;

        update_task_status(&db, id, "weird-state-42".into()).await?;
        assert_eq!(list_tasks(&db, None).await?[0].status, "weird-state-42");

        // No row with this id; still succeeds
        update_task_status(&db, id + 1000, "x".into()).await?;
        Ok(())
    }

    #[tokio::test]
    async fn list_filters_by_client_and_orders_by_due_date() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let a = seed_client(&db, "a").await?;
        let b = seed_client(&db, "b").await?;

        create_task(&db, NewTask { client_id: a, title: "may".into(), assigned_to: None, due_date: Some("2024-05-01".into()) }).await?;
        create_task(&db, NewTask { client_id: a, title: "none".into(), assigned_to: None, due_date: None }).await?;
        create_task(&db, NewTask { client_id: a, title: "april".into(), assigned_to: None, due_date: Some("2024-04-01".into()) }).await?;
        create_task(&db, NewTask { client_id: b, title: "other".into(), assigned_to: None, due_date: None }).await?;

        let rows = list_tasks(&db, Some(a)).await?;
        let titles: Vec<_> = rows.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["april", "may", "none"]);
        Ok(())
    }

    #[tokio::test]
    async fn equal_due_dates_break_ties_newest_first() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let cid = seed_client(&db, "ties").await?;
        create_task(&db, NewTask { client_id: cid, title: "first".into(), assigned_to: None, due_date: Some("2024-07-01".into()) }).await?;
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        create_task(&db, NewTask { client_id: cid, title: "second".into(), assigned_to: None, due_date: Some("2024-07-01".into()) }).await?;

        let rows = list_tasks(&db, Some(cid)).await?;
        let titles: Vec<_> = rows.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["second", "first"]);
        Ok(())
    }

    #[tokio::test]
    async fn blank_title_is_rejected() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let cid = seed_client(&db, "strict").await?;
        let err = create_task(
            &db,
            NewTask { client_id: cid, title: "   ".into(), assigned_to: None, due_date: None },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::Model(_)));
        Ok(())
    }
}
