use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::{error, warn};

use common::Envelope;
use service::auth::errors::AuthError;
use service::errors::ServiceError;

/// Handler failure rendered as an error envelope.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub error: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>, error: impl Into<String>) -> Self {
        Self { status, message: message.into(), error: error.into() }
    }

    pub fn bad_request(error: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Invalid request body", error)
    }

    pub fn unauthorized(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message, error)
    }

    pub fn unprocessable(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, message, error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, error = %self.error, "request failed");
        } else {
            warn!(status = %self.status, error = %self.error, "request rejected");
        }
        let body: Envelope = Envelope::error(self.message, self.error);
        (self.status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        let message = if e.is_not_found() { "Invalid User" } else { "Request could not be processed" };
        ApiError::unprocessable(message, e.to_string())
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        let error = e.to_string();
        match e {
            AuthError::Validation(_) => ApiError::new(StatusCode::BAD_REQUEST, "Invalid request", error),
            AuthError::OtpRejected => ApiError::unauthorized("Invalid OTP", error),
            AuthError::UnverifiedEmail => ApiError::unauthorized("Email not verified", error),
            AuthError::OAuth(_) | AuthError::StateMismatch => ApiError::unauthorized("Google sign-in failed", error),
            AuthError::InvalidToken | AuthError::TokenError(_) => ApiError::unauthorized("Unauthorized", error),
            AuthError::Provider(_) => ApiError::unprocessable("OTP provider error", error),
            AuthError::User(inner) => inner.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
