use std::sync::Arc;

use service::auth::oauth::IdentityProvider;
use service::auth::otp::OtpProvider;
use service::auth::{AuthService, TokenSigner};
use service::user::repository::UserRepository;
use service::user::UserService;

/// Shared handler state. Everything inside is immutable and cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService<dyn UserRepository>>,
    pub users: Arc<UserService<dyn UserRepository>>,
    pub tokens: Arc<TokenSigner>,
}

impl AppState {
    pub fn new(
        repo: Arc<dyn UserRepository>,
        otp: Arc<dyn OtpProvider>,
        identity: Arc<dyn IdentityProvider>,
        tokens: Arc<TokenSigner>,
    ) -> Self {
        let users = Arc::new(UserService::new(repo));
        let auth = Arc::new(AuthService::new(users.clone(), otp, identity, tokens.clone()));
        Self { auth, users, tokens }
    }
}
