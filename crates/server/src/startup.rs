use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::AppConfig;
use tower_http::cors::CorsLayer;
use tracing::info;

use service::auth::oauth::GoogleOAuthClient;
use service::auth::otp::TwilioVerifyClient;
use service::auth::TokenSigner;
use service::user::repo::SeaOrmUserRepository;

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Wire the sea-orm repository and the live providers from configuration.
pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    let db = models::db::connect_with_config(&cfg.database).await?;
    let state = AppState::new(
        Arc::new(SeaOrmUserRepository::new(db)),
        Arc::new(TwilioVerifyClient::new(cfg.otp.clone())),
        Arc::new(GoogleOAuthClient::new(cfg.google.clone())),
        Arc::new(TokenSigner::new(&cfg.auth)),
    );
    Ok(routes::build_router(state, build_cors()))
}

/// Public entry: load config, build the app and run the HTTP server.
/// Expects `.env` and the tracing subscriber to be set up by the binary.
pub async fn run() -> anyhow::Result<()> {
    let cfg = AppConfig::load_and_validate().map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    let app = build_app(&cfg).await?;

    let addr: SocketAddr = cfg.server.bind_address().parse()?;
    info!(%addr, "starting server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
