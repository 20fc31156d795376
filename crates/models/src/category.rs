use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub category: String,
    #[sea_orm(unique)]
    pub category_icon: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match *self {}
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create(db: &DatabaseConnection, category: &str, icon: &str) -> Result<Model, ModelError> {
    if category.trim().is_empty() { return Err(ModelError::Validation("category required".into())); }
    if icon.trim().is_empty() { return Err(ModelError::Validation("category icon required".into())); }
    let am = ActiveModel {
        category: Set(category.to_string()),
        category_icon: Set(icon.to_string()),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}
