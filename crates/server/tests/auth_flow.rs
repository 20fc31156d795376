use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::Service;

use service::auth::oauth::mock::MockIdentityProvider;
use service::auth::otp::mock::MockOtpProvider;
use service::auth::TokenSigner;
use service::user::repository::mock::MockUserRepository;
use server::{routes, AppState};

fn cors() -> tower_http::cors::CorsLayer { tower_http::cors::CorsLayer::very_permissive() }

struct TestApp {
    app: Router,
    repo: Arc<MockUserRepository>,
}

fn build_app() -> TestApp {
    build_app_with_state("state-123")
}

fn build_app_with_state(oauth_state: &str) -> TestApp {
    let repo = Arc::new(MockUserRepository::default());
    let identity = MockIdentityProvider::new(oauth_state)
        .with_user("good-code", "g@example.com", true)
        .with_user("unverified-code", "u@example.com", false);
    let tokens = TokenSigner::new(&configs::AuthConfig {
        access_secret: "test-access".into(),
        refresh_secret: "test-refresh".into(),
        ..Default::default()
    });
    let state = AppState::new(
        repo.clone(),
        Arc::new(MockOtpProvider::accepting("1234")),
        Arc::new(identity),
        Arc::new(tokens),
    );
    TestApp { app: routes::build_router(state, cors()), repo }
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn signup(app: &mut Router) -> Value {
    let req = post_json("/user/signup-and-login", json!({"countrycode": "+1", "phonenumber": "5550100", "otp": "1234"}));
    let resp = app.call(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    body_json(resp).await
}

#[tokio::test]
async fn test_health() {
    let mut t = build_app();
    let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let resp = t.app.call(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, json!({"status": "ok"}));
}

#[tokio::test]
async fn test_send_otp() {
    let mut t = build_app();
    let resp = t.app.call(post_json("/user/sent-otp", json!({"countrycode": "+1", "phonenumber": "5550100"}))).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["status"], json!(true));
    assert!(body.get("errors").is_none());
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let mut t = build_app();
    let req = Request::builder()
        .method("POST")
        .uri("/user/signup-and-login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let resp = t.app.call(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["status"], json!(false));
    assert_eq!(body["errors"].as_array().map(|a| a.len()), Some(1));
}

#[tokio::test]
async fn test_signup_issues_tokens_once_per_phone() {
    let mut t = build_app();
    let first = signup(&mut t.app).await;
    let second = signup(&mut t.app).await;
    assert!(!first["data"]["accesstoken"].as_str().unwrap().is_empty());
    assert!(!first["data"]["refreshtoken"].as_str().unwrap().is_empty());
    assert!(second["data"]["accesstoken"].is_string());
    assert_eq!(t.repo.user_count(), 1);
}

#[tokio::test]
async fn test_wrong_otp_is_unauthorized() {
    let mut t = build_app();
    let req = post_json("/user/signup-and-login", json!({"countrycode": "+1", "phonenumber": "5550100", "otp": "9999"}));
    let resp = t.app.call(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(t.repo.user_count(), 0);
}

#[tokio::test]
async fn test_google_login_redirects() {
    let mut t = build_app();
    let req = Request::builder().uri("/user/login-gl").body(Body::empty()).unwrap();
    let resp = t.app.call(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    let location = resp.headers().get(header::LOCATION).unwrap().to_str().unwrap();
    assert!(location.contains("state=state-123"));
}

#[tokio::test]
async fn test_google_callback_outcomes() {
    let mut t = build_app();
    let get = |uri: &str| Request::builder().uri(uri).body(Body::empty()).unwrap();

    let resp = t.app.call(get("/user/callback-gl?state=wrong&code=good-code")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/");

    let resp = t.app.call(get("/user/callback-gl?state=state-123&error_reason=user_denied")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = t.app.call(get("/user/callback-gl?state=state-123&code=unverified-code")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(t.repo.user_count(), 0);

    let resp = t.app.call(get("/user/callback-gl?state=state-123&code=bogus")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = t.app.call(get("/user/callback-gl?state=state-123&code=good-code")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert!(body["data"]["accesstoken"].is_string());
    assert_eq!(t.repo.user_count(), 1);
}

#[tokio::test]
async fn test_callback_with_blank_state_is_refused() {
    let mut t = build_app_with_state("");
    let req = Request::builder().uri("/user/callback-gl?state=&code=good-code").body(Body::empty()).unwrap();
    let resp = t.app.call(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(t.repo.user_count(), 0);
}

#[tokio::test]
async fn test_profile_requires_bearer_token() {
    let mut t = build_app();
    let resp = t.app.call(post_json("/user/add-profile", json!({}))).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = Request::builder()
        .uri("/user/profile")
        .header(header::AUTHORIZATION, "Bearer not-a-token")
        .body(Body::empty())
        .unwrap();
    let resp = t.app.call(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // refresh tokens are not accepted as access tokens
    let tokens = signup(&mut t.app).await;
    let refresh = tokens["data"]["refreshtoken"].as_str().unwrap();
    let req = Request::builder()
        .uri("/user/profile")
        .header(header::AUTHORIZATION, format!("Bearer {refresh}"))
        .body(Body::empty())
        .unwrap();
    let resp = t.app.call(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_add_profile_then_get_profile() {
    let mut t = build_app();
    let tokens = signup(&mut t.app).await;
    let access = tokens["data"]["accesstoken"].as_str().unwrap().to_string();

    let profile = json!({
        "email": "asha@example.com",
        "firstname": "Asha",
        "lastname": "Rao",
        "gender": "female",
        "dob": "1990-01-01",
        "profilephoto": "https://cdn.example.com/a.png"
    });
    let mut req = post_json("/user/add-profile", profile);
    req.headers_mut().insert(header::AUTHORIZATION, format!("Bearer {access}").parse().unwrap());
    let resp = t.app.call(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let req = Request::builder()
        .uri("/user/profile")
        .header(header::AUTHORIZATION, format!("Bearer {access}"))
        .body(Body::empty())
        .unwrap();
    let resp = t.app.call(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["data"]["email"], "asha@example.com");
    assert_eq!(body["data"]["first_name"], "Asha");
    assert_eq!(body["data"]["last_name"], "Rao");
    assert_eq!(body["data"]["phone"], "+15550100");
}

#[tokio::test]
async fn test_add_profile_invalid_email_is_unprocessable() {
    let mut t = build_app();
    let tokens = signup(&mut t.app).await;
    let access = tokens["data"]["accesstoken"].as_str().unwrap().to_string();

    let mut req = post_json("/user/add-profile", json!({
        "email": "not-an-email",
        "firstname": "A", "lastname": "B", "gender": "x", "dob": "2000-01-01"
    }));
    req.headers_mut().insert(header::AUTHORIZATION, format!("Bearer {access}").parse().unwrap());
    let resp = t.app.call(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_refresh_token_rotates_pair() {
    let mut t = build_app();
    let tokens = signup(&mut t.app).await;
    let refresh = tokens["data"]["refreshtoken"].as_str().unwrap();

    let resp = t.app.call(post_json("/user/refresh-token", json!({"refreshtoken": refresh}))).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_json(resp).await["data"]["accesstoken"].is_string());

    let access = tokens["data"]["accesstoken"].as_str().unwrap();
    let resp = t.app.call(post_json("/user/refresh-token", json!({"refreshtoken": access}))).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
