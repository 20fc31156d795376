use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct SendOtpRequest { pub countrycode: String, pub phonenumber: String }

#[derive(ToSchema)]
pub struct SignupRequest { pub countrycode: String, pub phonenumber: String, pub otp: String }

#[derive(ToSchema)]
pub struct RefreshRequest { pub refreshtoken: String }

#[derive(ToSchema)]
pub struct TokenResponse { pub accesstoken: String, pub refreshtoken: String }

#[derive(ToSchema)]
pub struct AddProfileRequest {
    pub email: String,
    pub firstname: String,
    pub lastname: String,
    pub gender: String,
    pub dob: String,
    pub profilephoto: String,
}

#[derive(ToSchema)]
pub struct ProfileResponse {
    pub user_id: i32,
    pub username: String,
    pub phone: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub dob: String,
    pub profile_photo: String,
}

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).bearer_format("JWT").build()),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::send_otp,
        crate::routes::auth::signup_and_login,
        crate::routes::auth::google_login,
        crate::routes::auth::google_callback,
        crate::routes::auth::refresh_token,
        crate::routes::user::add_profile,
        crate::routes::user::get_profile,
    ),
    components(
        schemas(
            HealthResponse,
            SendOtpRequest,
            SignupRequest,
            RefreshRequest,
            TokenResponse,
            AddProfileRequest,
            ProfileResponse,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "user")
    )
)]
pub struct ApiDoc;
