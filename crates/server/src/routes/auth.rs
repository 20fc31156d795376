use axum::{
    extract::{Query, Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use axum_extra::extract::WithRejection;
use serde::Deserialize;
use tracing::{info, warn};
use utoipa::IntoParams;

use common::Envelope;
use service::auth::domain::{OAuthCallback, PhoneInput, PhoneLoginInput, TokenPair};
use service::auth::errors::AuthError;
use service::auth::TokenType;

use crate::errors::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RefreshInput {
    pub refreshtoken: String,
}

/// Query string Google appends when redirecting back.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CallbackQuery {
    pub state: Option<String>,
    pub code: Option<String>,
    pub error_reason: Option<String>,
}

impl From<CallbackQuery> for OAuthCallback {
    fn from(q: CallbackQuery) -> Self {
        OAuthCallback { state: q.state, code: q.code, error_reason: q.error_reason }
    }
}

#[utoipa::path(post, path = "/user/sent-otp", tag = "auth", request_body = crate::openapi::SendOtpRequest, responses((status = 200, description = "OTP sent"), (status = 400, description = "Bad Request"), (status = 422, description = "Provider error")))]
pub async fn send_otp(
    State(state): State<AppState>,
    WithRejection(Json(input), _): WithRejection<Json<PhoneInput>, ApiError>,
) -> Result<Json<Envelope>, ApiError> {
    state.auth.send_otp(&input).await?;
    Ok(Json(Envelope::success("OTP sent successfully", None)))
}

#[utoipa::path(post, path = "/user/signup-and-login", tag = "auth", request_body = crate::openapi::SignupRequest, responses((status = 200, description = "Signed in", body = crate::openapi::TokenResponse), (status = 400, description = "Bad Request"), (status = 401, description = "Invalid OTP"), (status = 422, description = "Unprocessable")))]
pub async fn signup_and_login(
    State(state): State<AppState>,
    WithRejection(Json(input), _): WithRejection<Json<PhoneLoginInput>, ApiError>,
) -> Result<Json<Envelope<TokenPair>>, ApiError> {
    let tokens = state.auth.signup_with_phone(&input).await?;
    Ok(Json(Envelope::success("Signed in successfully", Some(tokens))))
}

#[utoipa::path(get, path = "/user/login-gl", tag = "auth", responses((status = 307, description = "Redirect to Google consent")))]
pub async fn google_login(State(state): State<AppState>) -> Result<Redirect, ApiError> {
    let url = state.auth.google_authorize_url()?;
    Ok(Redirect::temporary(&url))
}

#[utoipa::path(get, path = "/user/callback-gl", tag = "auth", params(CallbackQuery), responses((status = 200, description = "Signed in", body = crate::openapi::TokenResponse), (status = 307, description = "State mismatch"), (status = 400, description = "Missing code"), (status = 401, description = "Unauthorized"), (status = 422, description = "Unprocessable")))]
pub async fn google_callback(
    State(state): State<AppState>,
    Query(query): Query<CallbackQuery>,
) -> Result<Response, ApiError> {
    let cb = OAuthCallback::from(query);
    match state.auth.google_callback(&cb).await {
        Ok(tokens) => Ok(Json(Envelope::success("Signed in successfully", Some(tokens))).into_response()),
        Err(AuthError::StateMismatch) => Ok(Redirect::temporary("/").into_response()),
        Err(e) => Err(e.into()),
    }
}

#[utoipa::path(post, path = "/user/refresh-token", tag = "auth", request_body = crate::openapi::RefreshRequest, responses((status = 200, description = "New tokens", body = crate::openapi::TokenResponse), (status = 400, description = "Bad Request"), (status = 401, description = "Unauthorized")))]
pub async fn refresh_token(
    State(state): State<AppState>,
    WithRejection(Json(input), _): WithRejection<Json<RefreshInput>, ApiError>,
) -> Result<Json<Envelope<TokenPair>>, ApiError> {
    let tokens = state.auth.refresh(&input.refreshtoken)?;
    Ok(Json(Envelope::success("Token refreshed", Some(tokens))))
}

/// Route middleware: require `Authorization: Bearer <access token>` and put
/// the decoded claims into request extensions.
pub async fn require_jwt(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let path = req.uri().path().to_string();
    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string);

    let Some(token) = token else {
        warn!(path = %path, "missing bearer token");
        return Err(ApiError::unauthorized("Unauthorized", "missing bearer token"));
    };

    match state.tokens.verify(&token, TokenType::Access) {
        Ok(claims) => {
            info!(path = %path, user_id = claims.user_id, "token accepted");
            req.extensions_mut().insert(claims);
            Ok(next.run(req).await)
        }
        Err(e) => {
            warn!(path = %path, err = %e, "token validation failed");
            Err(e.into())
        }
    }
}
