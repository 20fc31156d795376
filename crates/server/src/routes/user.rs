use axum::{extract::State, Extension, Json};
use axum_extra::extract::WithRejection;
use serde::Deserialize;

use common::Envelope;
use service::auth::Claims;
use service::user::domain::{ProfileInput, UserProfile};

use crate::errors::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AddProfileInput {
    pub email: String,
    pub firstname: String,
    pub lastname: String,
    pub gender: String,
    pub dob: String,
    #[serde(default)]
    pub profilephoto: String,
}

#[utoipa::path(post, path = "/user/add-profile", tag = "user", request_body = crate::openapi::AddProfileRequest, security(("bearer" = [])), responses((status = 200, description = "Profile saved"), (status = 400, description = "Bad Request"), (status = 401, description = "Unauthorized"), (status = 422, description = "Unprocessable")))]
pub async fn add_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    WithRejection(Json(input), _): WithRejection<Json<AddProfileInput>, ApiError>,
) -> Result<Json<Envelope>, ApiError> {
    let profile = ProfileInput {
        user_id: claims.user_id,
        first_name: input.firstname,
        last_name: input.lastname,
        gender: input.gender,
        dob: input.dob,
        profile_photo: input.profilephoto,
    };
    state.users.add_profile_and_update_mail(&input.email, profile).await?;
    Ok(Json(Envelope::success("Profile added successfully", None)))
}

#[utoipa::path(get, path = "/user/profile", tag = "user", security(("bearer" = [])), responses((status = 200, description = "Profile", body = crate::openapi::ProfileResponse), (status = 401, description = "Unauthorized"), (status = 422, description = "Unprocessable")))]
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Envelope<UserProfile>>, ApiError> {
    let profile = state.users.get_profile(claims.user_id).await?;
    Ok(Json(Envelope::success("Profile fetched", Some(profile))))
}
