use std::sync::Arc;

use tracing::{info, warn, instrument};

use super::domain::{OAuthCallback, PhoneInput, PhoneLoginInput, TokenPair};
use super::errors::AuthError;
use super::oauth::IdentityProvider;
use super::otp::OtpProvider;
use super::token::{TokenSigner, TokenType};
use crate::user::domain::ROLE_USER;
use crate::user::repository::UserRepository;
use crate::user::UserService;

/// Sign-in orchestration independent of web framework
pub struct AuthService<R: UserRepository + ?Sized> {
    users: Arc<UserService<R>>,
    otp: Arc<dyn OtpProvider>,
    identity: Arc<dyn IdentityProvider>,
    tokens: Arc<TokenSigner>,
}

impl<R: UserRepository + ?Sized> AuthService<R> {
    pub fn new(
        users: Arc<UserService<R>>,
        otp: Arc<dyn OtpProvider>,
        identity: Arc<dyn IdentityProvider>,
        tokens: Arc<TokenSigner>,
    ) -> Self {
        Self { users, otp, identity, tokens }
    }

    fn check_phone(phone: &PhoneInput) -> Result<String, AuthError> {
        let number = phone.full_number();
        models::user::validate_phone(&number).map_err(|e| AuthError::Validation(e.to_string()))?;
        Ok(number)
    }

    fn issue(&self, user_id: i32) -> Result<TokenPair, AuthError> {
        self.tokens.pair(user_id, "", ROLE_USER)
    }

    /// Ask the provider to text a code to `countrycode + phonenumber`.
    #[instrument(skip(self, phone), fields(countrycode = %phone.countrycode))]
    pub async fn send_otp(&self, phone: &PhoneInput) -> Result<(), AuthError> {
        let number = Self::check_phone(phone)?;
        self.otp.send_otp(&number).await?;
        info!("otp_sent");
        Ok(())
    }

    pub async fn verify_otp(&self, phone: &str, otp: &str) -> Result<(), AuthError> {
        self.otp.verify_otp(phone, otp).await
    }

    /// Verify the code, find or create the user by phone, and issue tokens.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::auth::{AuthService, TokenSigner};
    /// use service::auth::domain::PhoneLoginInput;
    /// use service::auth::otp::mock::MockOtpProvider;
    /// use service::auth::oauth::mock::MockIdentityProvider;
    /// use service::user::{UserService, repository::mock::MockUserRepository};
    /// let users = Arc::new(UserService::new(Arc::new(MockUserRepository::default())));
    /// let tokens = Arc::new(TokenSigner::new(&configs::AuthConfig { access_secret: "a".into(), refresh_secret: "r".into(), ..Default::default() }));
    /// let svc = AuthService::new(users, Arc::new(MockOtpProvider::accepting("1234")), Arc::new(MockIdentityProvider::new("s")), tokens);
    /// let input = PhoneLoginInput { countrycode: "+1".into(), phonenumber: "5550100".into(), otp: "1234".into() };
    /// let pair = tokio_test::block_on(svc.signup_with_phone(&input)).unwrap();
    /// assert!(!pair.accesstoken.is_empty());
    /// ```
    #[instrument(skip(self, input), fields(countrycode = %input.countrycode))]
    pub async fn signup_with_phone(&self, input: &PhoneLoginInput) -> Result<TokenPair, AuthError> {
        let number = Self::check_phone(&input.phone())?;
        if input.otp.trim().is_empty() {
            return Err(AuthError::Validation("otp required".into()));
        }
        self.verify_otp(&number, input.otp.trim()).await?;
        let user_id = self.users.register_with_phone(&number).await?;
        self.issue(user_id)
    }

    pub fn google_authorize_url(&self) -> Result<String, AuthError> {
        self.identity.authorize_url()
    }

    /// Finish the Google flow. An unverified email never reaches registration.
    #[instrument(skip(self, cb))]
    pub async fn google_callback(&self, cb: &OAuthCallback) -> Result<TokenPair, AuthError> {
        let expected = self.identity.state();
        if expected.is_empty() || cb.state.as_deref() != Some(expected) {
            warn!("oauth state mismatch");
            return Err(AuthError::StateMismatch);
        }
        let code = match cb.code.as_deref().filter(|c| !c.is_empty()) {
            Some(code) => code,
            None => {
                let reason = match cb.error_reason.as_deref() {
                    Some("user_denied") => "user has denied permission".to_string(),
                    Some(other) => other.to_string(),
                    None => "code not found".to_string(),
                };
                return Err(AuthError::Validation(reason));
            }
        };
        let google = self.identity.exchange(code).await?;
        if !google.verified_email {
            warn!(email = %google.email, "unverified google email");
            return Err(AuthError::UnverifiedEmail);
        }
        let user_id = self.users.register_with_email(&google.email).await?;
        self.issue(user_id)
    }

    /// Trade a refresh token for a new pair.
    pub fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AuthError> {
        let claims = self.tokens.verify(refresh_token, TokenType::Refresh)?;
        self.tokens.pair(claims.user_id, &claims.username, &claims.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::oauth::mock::MockIdentityProvider;
    use crate::auth::otp::mock::MockOtpProvider;
    use crate::user::repository::mock::MockUserRepository;
    use configs::AuthConfig;

    struct Fixture {
        repo: Arc<MockUserRepository>,
        otp: Arc<MockOtpProvider>,
        svc: AuthService<MockUserRepository>,
    }

    fn fixture_with(otp: MockOtpProvider) -> Fixture {
        fixture_with_state(otp, "st")
    }

    fn fixture_with_state(otp: MockOtpProvider, state: &str) -> Fixture {
        let repo = Arc::new(MockUserRepository::default());
        let otp = Arc::new(otp);
        let identity = MockIdentityProvider::new(state)
            .with_user("good", "a@example.com", true)
            .with_user("unverified", "b@example.com", false);
        let tokens = Arc::new(TokenSigner::new(&AuthConfig {
            access_secret: "a".into(),
            refresh_secret: "r".into(),
            ..Default::default()
        }));
        let svc = AuthService::new(Arc::new(UserService::new(repo.clone())), otp.clone(), Arc::new(identity), tokens);
        Fixture { repo, otp, svc }
    }

    fn fixture() -> Fixture {
        fixture_with(MockOtpProvider::accepting("1234"))
    }

    fn login(otp: &str) -> PhoneLoginInput {
        PhoneLoginInput { countrycode: "+1".into(), phonenumber: "5550100".into(), otp: otp.into() }
    }

    #[tokio::test]
    async fn send_otp_uses_full_number() {
        let f = fixture();
        f.svc.send_otp(&PhoneInput { countrycode: "+1".into(), phonenumber: "5550100".into() }).await.unwrap();
        assert_eq!(f.otp.sent_to(), vec!["+15550100".to_string()]);
    }

    #[tokio::test]
    async fn wrong_otp_creates_no_user() {
        let f = fixture();
        let err = f.svc.signup_with_phone(&login("0000")).await.unwrap_err();
        assert!(matches!(err, AuthError::OtpRejected));
        assert_eq!(f.repo.user_count(), 0);
    }

    #[tokio::test]
    async fn valid_otp_registers_once_and_issues_tokens() {
        let f = fixture();
        let first = f.svc.signup_with_phone(&login("1234")).await.unwrap();
        let second = f.svc.signup_with_phone(&login("1234")).await.unwrap();
        assert!(!first.accesstoken.is_empty() && !first.refreshtoken.is_empty());
        assert_eq!(f.repo.user_count(), 1);

        let a = f.svc.tokens.verify(&first.accesstoken, TokenType::Access).unwrap();
        let b = f.svc.tokens.verify(&second.accesstoken, TokenType::Access).unwrap();
        assert_eq!(a.user_id, b.user_id);
        assert_eq!(a.role, "user");
    }

    #[tokio::test]
    async fn provider_outage_is_provider_error() {
        let f = fixture_with(MockOtpProvider::unreachable());
        let err = f.svc.signup_with_phone(&login("1234")).await.unwrap_err();
        assert!(matches!(err, AuthError::Provider(_)));
    }

    #[tokio::test]
    async fn google_callback_paths() {
        let f = fixture();
        let cb = |state: &str, code: Option<&str>, reason: Option<&str>| OAuthCallback {
            state: Some(state.into()),
            code: code.map(Into::into),
            error_reason: reason.map(Into::into),
        };

        assert!(matches!(f.svc.google_callback(&cb("other", Some("good"), None)).await, Err(AuthError::StateMismatch)));
        match f.svc.google_callback(&cb("st", None, Some("user_denied"))).await {
            Err(AuthError::Validation(m)) => assert!(m.contains("denied")),
            other => panic!("unexpected: {other:?}"),
        }
        assert!(matches!(f.svc.google_callback(&cb("st", Some("unverified"), None)).await, Err(AuthError::UnverifiedEmail)));
        assert_eq!(f.repo.user_count(), 0);

        let pair = f.svc.google_callback(&cb("st", Some("good"), None)).await.unwrap();
        assert!(!pair.accesstoken.is_empty());
        assert_eq!(f.repo.user_count(), 1);
    }

    #[tokio::test]
    async fn empty_configured_state_never_matches() {
        let f = fixture_with_state(MockOtpProvider::accepting("1234"), "");
        let forged = OAuthCallback { state: Some(String::new()), code: Some("good".into()), error_reason: None };
        assert!(matches!(f.svc.google_callback(&forged).await, Err(AuthError::StateMismatch)));
        let missing = OAuthCallback { state: None, code: Some("good".into()), error_reason: None };
        assert!(matches!(f.svc.google_callback(&missing).await, Err(AuthError::StateMismatch)));
        assert_eq!(f.repo.user_count(), 0);
    }

    #[tokio::test]
    async fn refresh_requires_refresh_token() {
        let f = fixture();
        let pair = f.svc.signup_with_phone(&login("1234")).await.unwrap();
        let renewed = f.svc.refresh(&pair.refreshtoken).unwrap();
        assert!(f.svc.tokens.verify(&renewed.accesstoken, TokenType::Access).is_ok());
        assert!(matches!(f.svc.refresh(&pair.accesstoken), Err(AuthError::InvalidToken)));
    }
}
