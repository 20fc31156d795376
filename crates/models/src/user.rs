use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

pub const STATUS_NEW: &str = "newuser";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(unique)]
    pub phone: String,
    #[sea_orm(unique)]
    pub email: String,
    #[serde(skip_serializing)]
    pub password: Option<String>,
    pub user_type: String,
    pub verification: bool,
    pub status: String,
    pub profile_photo: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match *self {}
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Column values for a new `users` row.
#[derive(Clone, Debug)]
pub struct NewUser<'a> {
    pub username: &'a str,
    pub phone: &'a str,
    pub email: &'a str,
    pub user_type: &'a str,
}

pub fn validate_email(email: &str) -> Result<(), ModelError> {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.') => Ok(()),
        _ => Err(ModelError::Validation("invalid email".into())),
    }
}

/// Digits with an optional leading `+`.
pub fn validate_phone(phone: &str) -> Result<(), ModelError> {
    let digits = phone.strip_prefix('+').unwrap_or(phone);
    if digits.len() < 4 || digits.len() > 20 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ModelError::Validation("invalid phone number".into()));
    }
    Ok(())
}

pub fn validate_username(name: &str) -> Result<(), ModelError> {
    if name.trim().is_empty() { return Err(ModelError::Validation("username required".into())); }
    if name.len() > 64 { return Err(ModelError::Validation("username too long".into())); }
    Ok(())
}

pub fn validate_user_type(user_type: &str) -> Result<(), ModelError> {
    match user_type {
        "admin" | "worker" | "user" => Ok(()),
        _ => Err(ModelError::Validation("user_type must be admin, worker or user".into())),
    }
}

pub async fn create(db: &DatabaseConnection, new: NewUser<'_>) -> Result<Model, ModelError> {
    validate_username(new.username)?;
    validate_phone(new.phone)?;
    validate_email(new.email)?;
    validate_user_type(new.user_type)?;
    let now = Utc::now().into();
    let am = ActiveModel {
        username: Set(new.username.to_string()),
        phone: Set(new.phone.to_string()),
        email: Set(new.email.to_string()),
        password: Set(None),
        user_type: Set(new.user_type.to_string()),
        verification: Set(false),
        status: Set(STATUS_NEW.to_string()),
        profile_photo: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

pub async fn find_by_phone(db: &DatabaseConnection, phone: &str) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find().filter(Column::Phone.eq(phone)).one(db).await?)
}

pub async fn find_by_email(db: &DatabaseConnection, email: &str) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find().filter(Column::Email.eq(email)).one(db).await?)
}

pub async fn update_email(db: &DatabaseConnection, id: i32, email: &str) -> Result<Model, ModelError> {
    validate_email(email)?;
    let mut found: ActiveModel = Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(ModelError::NotFound("user"))?
        .into();
    found.email = Set(email.to_string());
    found.updated_at = Set(Utc::now().into());
    Ok(found.update(db).await?)
}
