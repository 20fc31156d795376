use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "banners")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub image: String,
    pub deeplink: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match *self {}
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create(db: &DatabaseConnection, image: &str, deeplink: &str) -> Result<Model, ModelError> {
    if image.trim().is_empty() || deeplink.trim().is_empty() {
        return Err(ModelError::Validation("banner image and deeplink required".into()));
    }
    let am = ActiveModel {
        image: Set(image.to_string()),
        deeplink: Set(deeplink.to_string()),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}
