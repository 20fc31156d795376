pub mod auth;
pub mod user;

use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::openapi::ApiDoc;
use crate::state::AppState;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: health, `/user` sign-in routes, the
/// JWT-protected profile routes and the Swagger UI.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let protected = Router::new()
        .route("/add-profile", post(user::add_profile))
        .route("/profile", get(user::get_profile))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_jwt));

    let user_routes = Router::new()
        .route("/sent-otp", post(auth::send_otp))
        .route("/signup-and-login", post(auth::signup_and_login))
        .route("/login-gl", get(auth::google_login))
        .route("/callback-gl", get(auth::google_callback))
        .route("/refresh-token", post(auth::refresh_token))
        .merge(protected);

    Router::new()
        .route("/health", get(health))
        .nest("/user", user_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 5xx
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
