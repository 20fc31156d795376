use std::sync::Arc;

use rand::{distributions::Alphanumeric, Rng};
use tracing::{info, debug, instrument};

use super::domain::{NewUser, ProfileInput, UserProfile, ROLE_USER};
use super::repository::UserRepository;
use crate::errors::ServiceError;

/// User use cases independent of the web framework.
pub struct UserService<R: UserRepository + ?Sized> {
    repo: Arc<R>,
}

fn random_token(len: usize) -> String {
    rand::thread_rng().sample_iter(&Alphanumeric).take(len).map(char::from).collect::<String>().to_lowercase()
}

/// Placeholder phone for users who signed up without one.
fn random_phone() -> String {
    let mut rng = rand::thread_rng();
    let digits: String = (0..12).map(|_| char::from(b'0' + rng.gen_range(0..10u8))).collect();
    format!("+0{digits}")
}

fn random_email() -> String {
    format!("{}@placeholder.workey.app", random_token(16))
}

fn random_username() -> String {
    format!("user_{}", random_token(12))
}

impl<R: UserRepository + ?Sized> UserService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Return the id of the user owning `phone`, creating one on first sight.
    ///
    /// # Examples
    /// ```
    /// use service::user::{UserService, repository::mock::MockUserRepository};
    /// use std::sync::Arc;
    /// let svc = UserService::new(Arc::new(MockUserRepository::default()));
    /// let first = tokio_test::block_on(svc.register_with_phone("+15550100")).unwrap();
    /// let again = tokio_test::block_on(svc.register_with_phone("+15550100")).unwrap();
    /// assert_eq!(first, again);
    /// ```
    #[instrument(skip(self))]
    pub async fn register_with_phone(&self, phone: &str) -> Result<i32, ServiceError> {
        match self.repo.find_by_phone(phone).await {
            Ok(user) => {
                debug!(user_id = user.id, "user_found");
                Ok(user.id)
            }
            Err(e) if e.is_not_found() => {
                let id = self.repo.create_user(NewUser {
                    username: random_username(),
                    phone: phone.to_string(),
                    email: random_email(),
                    user_type: ROLE_USER.to_string(),
                }).await?;
                info!(user_id = id, "user_registered");
                Ok(id)
            }
            Err(e) => Err(e),
        }
    }

    /// Same as [`register_with_phone`](Self::register_with_phone), keyed by email.
    #[instrument(skip(self))]
    pub async fn register_with_email(&self, email: &str) -> Result<i32, ServiceError> {
        match self.repo.find_by_email(email).await {
            Ok(user) => {
                debug!(user_id = user.id, "user_found");
                Ok(user.id)
            }
            Err(e) if e.is_not_found() => {
                let id = self.repo.create_user(NewUser {
                    username: random_username(),
                    phone: random_phone(),
                    email: email.to_string(),
                    user_type: ROLE_USER.to_string(),
                }).await?;
                info!(user_id = id, "user_registered");
                Ok(id)
            }
            Err(e) => Err(e),
        }
    }

    #[instrument(skip(self, email))]
    pub async fn update_mail(&self, email: &str, user_id: i32) -> Result<(), ServiceError> {
        models::user::validate_email(email)?;
        self.repo.update_email(user_id, email).await
    }

    #[instrument(skip(self, profile), fields(user_id = profile.user_id))]
    pub async fn add_profile(&self, profile: ProfileInput) -> Result<(), ServiceError> {
        self.repo.upsert_profile(profile).await?;
        info!("profile_saved");
        Ok(())
    }

    /// Update the mail, then write the profile. The two writes are independent:
    /// a failing profile write leaves the new mail in place.
    pub async fn add_profile_and_update_mail(&self, email: &str, profile: ProfileInput) -> Result<(), ServiceError> {
        self.update_mail(email, profile.user_id).await?;
        self.add_profile(profile).await
    }

    #[instrument(skip(self))]
    pub async fn get_profile(&self, user_id: i32) -> Result<UserProfile, ServiceError> {
        self.repo.get_profile(user_id).await
    }
}
