use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use configs::AuthConfig;

use super::domain::TokenPair;
use super::errors::AuthError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// JWT claims carried by access and refresh tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub user_id: i32,
    pub username: String,
    pub role: String,
    pub token_type: TokenType,
    pub iat: usize,
    pub exp: usize,
}

struct KeyPair {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: u64,
}

impl KeyPair {
    fn new(secret: &str, ttl_secs: u64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs,
        }
    }
}

/// HS256 signer holding separate keys for access and refresh tokens.
pub struct TokenSigner {
    access: KeyPair,
    refresh: KeyPair,
}

impl TokenSigner {
    pub fn new(cfg: &AuthConfig) -> Self {
        Self {
            access: KeyPair::new(&cfg.access_secret, cfg.access_ttl_secs),
            refresh: KeyPair::new(&cfg.refresh_secret, cfg.refresh_ttl_secs),
        }
    }

    fn keys(&self, kind: TokenType) -> &KeyPair {
        match kind {
            TokenType::Access => &self.access,
            TokenType::Refresh => &self.refresh,
        }
    }

    fn issue(&self, kind: TokenType, user_id: i32, username: &str, role: &str) -> Result<String, AuthError> {
        let keys = self.keys(kind);
        let now = Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: user_id.to_string(),
            user_id,
            username: username.to_string(),
            role: role.to_string(),
            token_type: kind,
            iat: now,
            exp: now + keys.ttl_secs as usize,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &keys.encoding).map_err(|e| AuthError::TokenError(e.to_string()))
    }

    pub fn access_token(&self, user_id: i32, username: &str, role: &str) -> Result<String, AuthError> {
        self.issue(TokenType::Access, user_id, username, role)
    }

    pub fn refresh_token(&self, user_id: i32, username: &str, role: &str) -> Result<String, AuthError> {
        self.issue(TokenType::Refresh, user_id, username, role)
    }

    pub fn pair(&self, user_id: i32, username: &str, role: &str) -> Result<TokenPair, AuthError> {
        Ok(TokenPair {
            accesstoken: self.access_token(user_id, username, role)?,
            refreshtoken: self.refresh_token(user_id, username, role)?,
        })
    }

    /// Decode and check signature, expiry and token type.
    pub fn verify(&self, token: &str, kind: TokenType) -> Result<Claims, AuthError> {
        let data = decode::<Claims>(token, &self.keys(kind).decoding, &Validation::new(Algorithm::HS256))
            .map_err(|_| AuthError::InvalidToken)?;
        if data.claims.token_type != kind {
            return Err(AuthError::InvalidToken);
        }
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer() -> TokenSigner {
        TokenSigner::new(&AuthConfig {
            access_secret: "access-secret".into(),
            refresh_secret: "refresh-secret".into(),
            ..Default::default()
        })
    }

    #[test]
    fn access_token_round_trips_claims() {
        let s = signer();
        let token = s.access_token(42, "", "user").unwrap();
        let claims = s.verify(&token, TokenType::Access).unwrap();
        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.role, "user");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn refresh_token_is_not_an_access_token() {
        let s = signer();
        let pair = s.pair(7, "", "user").unwrap();
        assert!(s.verify(&pair.refreshtoken, TokenType::Access).is_err());
        assert!(s.verify(&pair.accesstoken, TokenType::Refresh).is_err());
        assert!(s.verify(&pair.refreshtoken, TokenType::Refresh).is_ok());
    }

    #[test]
    fn same_secret_still_checks_token_type() {
        let s = TokenSigner::new(&AuthConfig {
            access_secret: "shared".into(),
            refresh_secret: "shared".into(),
            ..Default::default()
        });
        let refresh = s.refresh_token(1, "", "user").unwrap();
        assert!(matches!(s.verify(&refresh, TokenType::Access), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn expired_and_garbage_tokens_are_rejected() {
        let s = signer();
        let past = Utc::now().timestamp() as usize - 3600;
        let claims = Claims {
            sub: "1".into(),
            user_id: 1,
            username: String::new(),
            role: "user".into(),
            token_type: TokenType::Access,
            iat: past - 60,
            exp: past,
        };
        let expired = encode(&Header::new(Algorithm::HS256), &claims, &EncodingKey::from_secret(b"access-secret")).unwrap();
        assert!(s.verify(&expired, TokenType::Access).is_err());
        assert!(s.verify("not.a.jwt", TokenType::Access).is_err());
    }
}
