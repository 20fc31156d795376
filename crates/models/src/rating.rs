use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use serde::{Deserialize, Serialize};

use crate::{errors::ModelError, user};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ratings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub worker_id: i32,
    pub user_id: i32,
    pub rating: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Worker, Rater }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Worker => Entity::belongs_to(user::Entity)
                .from(Column::WorkerId)
                .to(user::Column::Id)
                .into(),
            Relation::Rater => Entity::belongs_to(user::Entity)
                .from(Column::UserId)
                .to(user::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_rating(rating: i32) -> Result<(), ModelError> {
    if !(1..=5).contains(&rating) {
        return Err(ModelError::Validation("rating must be between 1 and 5".into()));
    }
    Ok(())
}

pub async fn create(db: &DatabaseConnection, worker_id: i32, user_id: i32, rating: i32) -> Result<Model, ModelError> {
    validate_rating(rating)?;
    if worker_id == user_id {
        return Err(ModelError::Validation("a worker cannot rate themselves".into()));
    }
    let am = ActiveModel {
        worker_id: Set(worker_id),
        user_id: Set(user_id),
        rating: Set(rating),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

#[cfg(test)]
mod tests {
    use super::validate_rating;

    #[test]
    fn rating_bounds() {
        assert!(validate_rating(1).is_ok());
        assert!(validate_rating(5).is_ok());
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(6).is_err());
    }
}
