use async_trait::async_trait;

use super::domain::{NewUser, ProfileInput, UserProfile, UserRecord};
use crate::errors::ServiceError;

/// Persistence seam for users and profiles.
///
/// Lookups return `ServiceError::NotFound` when no row matches so callers can
/// tell "absent" apart from a failing store.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_phone(&self, phone: &str) -> Result<UserRecord, ServiceError>;
    async fn find_by_email(&self, email: &str) -> Result<UserRecord, ServiceError>;
    async fn create_user(&self, user: NewUser) -> Result<i32, ServiceError>;

    async fn update_email(&self, user_id: i32, email: &str) -> Result<(), ServiceError>;
    async fn upsert_profile(&self, profile: ProfileInput) -> Result<(), ServiceError>;
    async fn get_profile(&self, user_id: i32) -> Result<UserProfile, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockUserRepository {
        users: Mutex<HashMap<i32, UserRecord>>,
        profiles: Mutex<HashMap<i32, ProfileInput>>,
    }

    impl MockUserRepository {
        pub fn user_count(&self) -> usize {
            self.users.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl UserRepository for MockUserRepository {
        async fn find_by_phone(&self, phone: &str) -> Result<UserRecord, ServiceError> {
            let users = self.users.lock().unwrap();
            users.values().find(|u| u.phone == phone).cloned().ok_or_else(|| ServiceError::not_found("user"))
        }

        async fn find_by_email(&self, email: &str) -> Result<UserRecord, ServiceError> {
            let users = self.users.lock().unwrap();
            users.values().find(|u| u.email == email).cloned().ok_or_else(|| ServiceError::not_found("user"))
        }

        async fn create_user(&self, user: NewUser) -> Result<i32, ServiceError> {
            let mut users = self.users.lock().unwrap();
            if users.values().any(|u| u.phone == user.phone || u.email == user.email || u.username == user.username) {
                return Err(ServiceError::Db("duplicate key value violates unique constraint".into()));
            }
            let id = users.len() as i32 + 1;
            users.insert(id, UserRecord { id, username: user.username, phone: user.phone, email: user.email, user_type: user.user_type });
            Ok(id)
        }

        async fn update_email(&self, user_id: i32, email: &str) -> Result<(), ServiceError> {
            let mut users = self.users.lock().unwrap();
            let user = users.get_mut(&user_id).ok_or_else(|| ServiceError::not_found("user"))?;
            user.email = email.to_string();
            Ok(())
        }

        async fn upsert_profile(&self, profile: ProfileInput) -> Result<(), ServiceError> {
            if !self.users.lock().unwrap().contains_key(&profile.user_id) {
                return Err(ServiceError::not_found("user"));
            }
            self.profiles.lock().unwrap().insert(profile.user_id, profile);
            Ok(())
        }

        async fn get_profile(&self, user_id: i32) -> Result<UserProfile, ServiceError> {
            let user = self.users.lock().unwrap().get(&user_id).cloned().ok_or_else(|| ServiceError::not_found("user"))?;
            let p = self.profiles.lock().unwrap().get(&user_id).cloned().unwrap_or_default();
            Ok(UserProfile {
                user_id,
                username: user.username,
                phone: user.phone,
                email: user.email,
                first_name: p.first_name,
                last_name: p.last_name,
                gender: p.gender,
                dob: p.dob,
                profile_photo: p.profile_photo,
            })
        }
    }
}
