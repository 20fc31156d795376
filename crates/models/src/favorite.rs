use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use serde::{Deserialize, Serialize};

use crate::{errors::ModelError, job, user};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "favorites")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub job_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { User, Job }

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
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create(db: &DatabaseConnection, user_id: i32, job_id: i32) -> Result<Model, ModelError> {
    let am = ActiveModel { user_id: Set(user_id), job_id: Set(job_id), ..Default::default() };
    Ok(am.insert(db).await?)
}
