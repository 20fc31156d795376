use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use serde::{Deserialize, Serialize};

use crate::{errors::ModelError, user};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "addresses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub category: String,
    pub map_coordinates: String,
    pub house_number: String,
    pub floor: String,
    pub block_or_tower: String,
    pub landmark: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { User }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::User => Entity::belongs_to(user::Entity)
                .from(Column::UserId)
                .to(user::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AddressFields {
    pub category: String,
    pub map_coordinates: String,
    pub house_number: String,
    pub floor: String,
    pub block_or_tower: String,
    pub landmark: String,
}

pub async fn create(db: &DatabaseConnection, user_id: i32, fields: AddressFields) -> Result<Model, ModelError> {
    if fields.category.trim().is_empty() {
        return Err(ModelError::Validation("address category required".into()));
    }
    let am = ActiveModel {
        user_id: Set(user_id),
        category: Set(fields.category),
        map_coordinates: Set(fields.map_coordinates),
        house_number: Set(fields.house_number),
        floor: Set(fields.floor),
        block_or_tower: Set(fields.block_or_tower),
        landmark: Set(fields.landmark),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}
