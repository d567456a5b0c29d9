use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::{payment, service_item, task, transaction};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "clients")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub notes: Option<String>,
    pub managed_by: Option<String>,
    pub status: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Services,
    Payments,
    Tasks,
    Transactions,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Services => Entity::has_many(service_item::Entity).into(),
            Relation::Payments => Entity::has_many(payment::Entity).into(),
            Relation::Tasks => Entity::has_many(task::Entity).into(),
            Relation::Transactions => Entity::has_many(transaction::Entity).into(),
        }
    }
}

impl Related<service_item::Entity> for Entity {
    fn to() -> RelationDef { Relation::Services.def() }
}

impl Related<payment::Entity> for Entity {
    fn to() -> RelationDef { Relation::Payments.def() }
}

impl Related<task::Entity> for Entity {
    fn to() -> RelationDef { Relation::Tasks.def() }
}

impl Related<transaction::Entity> for Entity {
    fn to() -> RelationDef { Relation::Transactions.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(name: &str) -> Result<(), ModelError> {
    if name.trim().is_empty() {
        return Err(ModelError::Validation("client name required".into()));
    }
    Ok(())
}
