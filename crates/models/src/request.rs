use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use serde::{Deserialize, Serialize};

use crate::{address, errors::ModelError, job, user};

pub const STATUS_PENDING: &str = "pending";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "requests")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub job_id: i32,
    pub address_id: i32,
    pub status: String,
    pub date: Option<String>,
    pub bid_amount: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { User, Job, Address }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::User => Entity::belongs_to(user::Entity)
                .from(Column::UserId)
                .to(user::Column::Id)
                .into(),
            Relation::Job => Entity::belongs_to(job::Entity)
                .from(Column::JobId)
                .to(job::Column::Id)
                .into(),
            Relation::Address => Entity::belongs_to(address::Entity)
                .from(Column::AddressId)
                .to(address::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Create a pending request. The address must belong to the requesting user.
pub async fn create(
    db: &DatabaseConnection,
    user_id: i32,
    job_id: i32,
    address_id: i32,
    date: Option<String>,
    bid_amount: Option<i32>,
) -> Result<Model, ModelError> {
    if let Some(bid) = bid_amount {
        if bid <= 0 { return Err(ModelError::Validation("bid amount must be positive".into())); }
    }
    let addr = address::Entity::find_by_id(address_id)
        .one(db)
        .await?
        .ok_or(ModelError::NotFound("address"))?;
    if addr.user_id != user_id {
        return Err(ModelError::Validation("address does not belong to user".into()));
    }
    let am = ActiveModel {
        user_id: Set(user_id),
        job_id: Set(job_id),
        address_id: Set(address_id),
        status: Set(STATUS_PENDING.to_string()),
        date: Set(date),
        bid_amount: Set(bid_amount),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}
