use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use serde::{Deserialize, Serialize};

use crate::{category, errors::ModelError, user};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "jobs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub worker_id: i32,
    pub category_id: i32,
    pub experience: String,
    pub description: String,
    pub full_day_wage: i32,
    pub half_day_wage: i32,
    pub open_work: bool,
    pub priority: bool,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Worker, Category }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Worker => Entity::belongs_to(user::Entity)
                .from(Column::WorkerId)
                .to(user::Column::Id)
                .into(),
            Relation::Category => Entity::belongs_to(category::Entity)
                .from(Column::CategoryId)
                .to(category::Column::Id)
                .into(),
        }
    }
}

impl Related<category::Entity> for Entity {
    fn to() -> RelationDef { Relation::Category.def() }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JobFields {
    pub category_id: i32,
    pub experience: String,
    pub description: String,
    pub full_day_wage: i32,
    pub half_day_wage: i32,
    pub priority: bool,
}

pub fn validate_wages(full_day: i32, half_day: i32) -> Result<(), ModelError> {
    if full_day <= 0 || half_day <= 0 {
        return Err(ModelError::Validation("wages must be positive".into()));
    }
    if half_day > full_day {
        return Err(ModelError::Validation("half day wage cannot exceed full day wage".into()));
    }
    Ok(())
}

/// Create a job for `worker_id`. The worker and the category must exist.
pub async fn create(db: &DatabaseConnection, worker_id: i32, fields: JobFields) -> Result<Model, ModelError> {
    validate_wages(fields.full_day_wage, fields.half_day_wage)?;
    if user::Entity::find_by_id(worker_id).one(db).await?.is_none() {
        return Err(ModelError::NotFound("worker"));
    }
    if category::Entity::find_by_id(fields.category_id).one(db).await?.is_none() {
        return Err(ModelError::NotFound("category"));
    }
    let am = ActiveModel {
        worker_id: Set(worker_id),
        category_id: Set(fields.category_id),
        experience: Set(fields.experience),
        description: Set(fields.description),
        full_day_wage: Set(fields.full_day_wage),
        half_day_wage: Set(fields.half_day_wage),
        open_work: Set(true),
        priority: Set(fields.priority),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}
