use thiserror::Error;

use crate::errors::ServiceError;

/// Business errors for auth workflows
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("invalid otp")]
    OtpRejected,
    #[error("provider error: {0}")]
    Provider(String),
    #[error("oauth state mismatch")]
    StateMismatch,
    #[error("oauth exchange failed: {0}")]
    OAuth(String),
    #[error("email is not verified")]
    UnverifiedEmail,
    #[error("invalid token")]
    InvalidToken,
    #[error("token error: {0}")]
    TokenError(String),
    #[error(transparent)]
    User(#[from] ServiceError),
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::Validation(_) => 1001,
            AuthError::OtpRejected => 1004,
            AuthError::StateMismatch => 1005,
            AuthError::UnverifiedEmail => 1006,
            AuthError::InvalidToken => 1007,
            AuthError::Provider(_) => 1101,
            AuthError::OAuth(_) => 1102,
            AuthError::TokenError(_) => 1103,
            AuthError::User(_) => 1200,
        }
    }
}
