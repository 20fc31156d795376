use sea_orm::{DatabaseConnection, EntityTrait};

use crate::errors::ServiceError;
use crate::user::domain::{NewUser, ProfileInput, UserProfile, UserRecord};
use crate::user::repository::UserRepository;

pub struct SeaOrmUserRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

fn to_record(u: models::user::Model) -> UserRecord {
    UserRecord { id: u.id, username: u.username, phone: u.phone, email: u.email, user_type: u.user_type }
}

#[async_trait::async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_by_phone(&self, phone: &str) -> Result<UserRecord, ServiceError> {
        models::user::find_by_phone(&self.db, phone)
            .await?
            .map(to_record)
            .ok_or_else(|| ServiceError::not_found("user"))
    }

    async fn find_by_email(&self, email: &str) -> Result<UserRecord, ServiceError> {
        models::user::find_by_email(&self.db, email)
            .await?
            .map(to_record)
            .ok_or_else(|| ServiceError::not_found("user"))
    }

    async fn create_user(&self, user: NewUser) -> Result<i32, ServiceError> {
        let created = models::user::create(&self.db, models::user::NewUser {
            username: &user.username,
            phone: &user.phone,
            email: &user.email,
            user_type: &user.user_type,
        })
        .await?;
        Ok(created.id)
    }

    async fn update_email(&self, user_id: i32, email: &str) -> Result<(), ServiceError> {
        models::user::update_email(&self.db, user_id, email).await?;
        Ok(())
    }

    async fn upsert_profile(&self, profile: ProfileInput) -> Result<(), ServiceError> {
        let fields = models::profile::ProfileFields {
            first_name: profile.first_name,
            last_name: profile.last_name,
            gender: profile.gender,
            dob: profile.dob,
            profile_photo: profile.profile_photo,
        };
        models::profile::upsert(&self.db, profile.user_id, fields).await?;
        Ok(())
    }

    async fn get_profile(&self, user_id: i32) -> Result<UserProfile, ServiceError> {
        let user = models::user::Entity::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?
            .ok_or_else(|| ServiceError::not_found("user"))?;
        let profile = models::profile::find_by_user(&self.db, user_id).await?;
        let mut out = UserProfile {
            user_id,
            username: user.username,
            phone: user.phone,
            email: user.email,
            ..Default::default()
        };
        if let Some(p) = profile {
            out.first_name = p.first_name;
            out.last_name = p.last_name;
            out.gender = p.gender;
            out.dob = p.dob;
            out.profile_photo = p.profile_photo;
        }
        Ok(out)
    }
}
