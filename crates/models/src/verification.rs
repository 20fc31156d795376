use sea_orm::{entity::prelude::*, Set, DatabaseConnection, QueryOrder};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{errors::ModelError, user};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "verifications")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub email: String,
    pub code: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match *self {}
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create(db: &DatabaseConnection, email: &str, code: &str) -> Result<Model, ModelError> {
    user::validate_email(email)?;
    if code.trim().is_empty() { return Err(ModelError::Validation("code required".into())); }
    let am = ActiveModel {
        email: Set(email.to_string()),
        code: Set(code.to_string()),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

/// Most recent code issued for `email`.
pub async fn latest_for_email(db: &DatabaseConnection, email: &str) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find()
        .filter(Column::Email.eq(email))
        .order_by_desc(Column::CreatedAt)
        .order_by_desc(Column::Id)
        .one(db)
        .await?)
}
