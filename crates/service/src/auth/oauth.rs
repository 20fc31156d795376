use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use configs::GoogleOAuthConfig;

use super::domain::GoogleUser;
use super::errors::AuthError;

/// Authorization-code OAuth provider.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// URL the browser is sent to for consent.
    fn authorize_url(&self) -> Result<String, AuthError>;
    /// State value expected back on the callback.
    fn state(&self) -> &str;
    /// Exchange an authorization code for the user's identity.
    async fn exchange(&self, code: &str) -> Result<GoogleUser, AuthError>;
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

pub struct GoogleOAuthClient {
    http: reqwest::Client,
    cfg: GoogleOAuthConfig,
}

impl GoogleOAuthClient {
    pub fn new(cfg: GoogleOAuthConfig) -> Self {
        Self { http: reqwest::Client::new(), cfg }
    }

    async fn access_token(&self, code: &str) -> Result<String, AuthError> {
        let resp = self.http
            .post(&self.cfg.token_url)
            .form(&[
                ("code", code),
                ("client_id", self.cfg.client_id.as_str()),
                ("client_secret", self.cfg.client_secret.as_str()),
                ("redirect_uri", self.cfg.redirect_url.as_str()),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .map_err(|e| AuthError::OAuth(e.to_string()))?;
        if !resp.status().is_success() {
            warn!(status = %resp.status(), "google token exchange failed");
            return Err(AuthError::OAuth(format!("token endpoint returned {}", resp.status())));
        }
        let token: TokenResponse = resp.json().await.map_err(|e| AuthError::OAuth(e.to_string()))?;
        Ok(token.access_token)
    }
}

#[async_trait]
impl IdentityProvider for GoogleOAuthClient {
    fn authorize_url(&self) -> Result<String, AuthError> {
        let scope = self.cfg.scopes.join(" ");
        let url = reqwest::Url::parse_with_params(&self.cfg.auth_url, &[
            ("client_id", self.cfg.client_id.as_str()),
            ("redirect_uri", self.cfg.redirect_url.as_str()),
            ("response_type", "code"),
            ("scope", scope.as_str()),
            ("state", self.cfg.state.as_str()),
        ])
        .map_err(|e| AuthError::Provider(e.to_string()))?;
        Ok(url.into())
    }

    fn state(&self) -> &str {
        &self.cfg.state
    }

    async fn exchange(&self, code: &str) -> Result<GoogleUser, AuthError> {
        let token = self.access_token(code).await?;
        let resp = self.http
            .get(&self.cfg.userinfo_url)
            .query(&[("access_token", token.as_str())])
            .send()
            .await
            .map_err(|e| AuthError::OAuth(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(AuthError::OAuth(format!("userinfo returned {}", resp.status())));
        }
        resp.json::<GoogleUser>().await.map_err(|e| AuthError::OAuth(e.to_string()))
    }
}

/// Provider that maps known codes to canned identities.
pub mod mock {
    use super::*;
    use std::collections::HashMap;

    pub struct MockIdentityProvider {
        state: String,
        users: HashMap<String, GoogleUser>,
    }

    impl MockIdentityProvider {
        pub fn new(state: &str) -> Self {
            Self { state: state.to_string(), users: HashMap::new() }
        }

        pub fn with_user(mut self, code: &str, email: &str, verified: bool) -> Self {
            self.users.insert(code.to_string(), GoogleUser {
                id: format!("g-{code}"),
                email: email.to_string(),
                verified_email: verified,
                picture: None,
            });
            self
        }
    }

    #[async_trait]
    impl IdentityProvider for MockIdentityProvider {
        fn authorize_url(&self) -> Result<String, AuthError> {
            Ok(format!("https://accounts.example.com/auth?response_type=code&state={}", self.state))
        }

        fn state(&self) -> &str {
            &self.state
        }

        async fn exchange(&self, code: &str) -> Result<GoogleUser, AuthError> {
            self.users.get(code).cloned().ok_or_else(|| AuthError::OAuth("invalid_grant".into()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(base: &str) -> GoogleOAuthConfig {
        GoogleOAuthConfig {
            client_id: "cid".into(),
            client_secret: "csecret".into(),
            state: "random-state".into(),
            token_url: format!("{base}/token"),
            userinfo_url: format!("{base}/oauth2/v2/userinfo"),
            ..Default::default()
        }
    }

    #[test]
    fn authorize_url_carries_required_params() {
        let client = GoogleOAuthClient::new(config("http://localhost"));
        let url = reqwest::Url::parse(&client.authorize_url().unwrap()).unwrap();
        let params: std::collections::HashMap<_, _> = url.query_pairs().into_owned().collect();
        assert_eq!(params["client_id"], "cid");
        assert_eq!(params["response_type"], "code");
        assert_eq!(params["state"], "random-state");
        assert_eq!(params["redirect_uri"], "http://localhost:9090/user/callback-gl");
        assert!(params["scope"].contains("userinfo.email"));
    }

    #[tokio::test]
    async fn exchange_fetches_userinfo_with_access_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .and(body_string_contains("grant_type=authorization_code"))
            .and(body_string_contains("code=abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "ya29.token",
                "token_type": "Bearer",
                "expires_in": 3599
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/oauth2/v2/userinfo"))
            .and(query_param("access_token", "ya29.token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "1234",
                "email": "a@example.com",
                "verified_email": true,
                "picture": "https://lh3.example.com/p.jpg"
            })))
            .mount(&server)
            .await;

        let user = GoogleOAuthClient::new(config(&server.uri())).exchange("abc").await.unwrap();
        assert_eq!(user.email, "a@example.com");
        assert!(user.verified_email);
    }

    #[tokio::test]
    async fn rejected_code_is_an_oauth_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({"error": "invalid_grant"})))
            .mount(&server)
            .await;

        let err = GoogleOAuthClient::new(config(&server.uri())).exchange("stale").await.unwrap_err();
        assert!(matches!(err, AuthError::OAuth(_)));
    }
}
