use sea_orm::entity::prelude::*;
use sea_orm::{EntityTrait, ColumnTrait, QueryFilter, ActiveModelTrait, Set, DatabaseConnection};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{errors::ModelError, user};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub user_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub dob: String,
    pub profile_photo: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
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

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef { Relation::User.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Personal details written by add-profile.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileFields {
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub dob: String,
    pub profile_photo: String,
}

pub async fn find_by_user(db: &DatabaseConnection, user_id: i32) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find().filter(Column::UserId.eq(user_id)).one(db).await?)
}

/// Insert the user's profile row, or overwrite it when one already exists.
pub async fn upsert(db: &DatabaseConnection, user_id: i32, fields: ProfileFields) -> Result<Model, ModelError> {
    if user::Entity::find_by_id(user_id).one(db).await?.is_none() {
        return Err(ModelError::NotFound("user"));
    }
    let now = Utc::now().into();
    if let Some(existing) = find_by_user(db, user_id).await? {
        let mut am: ActiveModel = existing.into();
        am.first_name = Set(fields.first_name);
        am.last_name = Set(fields.last_name);
        am.gender = Set(fields.gender);
        am.dob = Set(fields.dob);
        am.profile_photo = Set(fields.profile_photo);
        am.updated_at = Set(now);
        Ok(am.update(db).await?)
    } else {
        let am = ActiveModel {
            user_id: Set(user_id),
            first_name: Set(fields.first_name),
            last_name: Set(fields.last_name),
            gender: Set(fields.gender),
            dob: Set(fields.dob),
            profile_photo: Set(fields.profile_photo),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        Ok(am.insert(db).await?)
    }
}
