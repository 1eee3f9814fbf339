//! PPE portal gateway composition root.

#![forbid(unsafe_code)]

mod dto;
mod error;
mod gateway_config;
mod gateway_router;
mod handlers;
mod state;

use std::sync::Arc;

use ppe_portal_application::RelayService;
use ppe_portal_core::AppError;
use ppe_portal_infrastructure::HttpBackendRelay;
use tokio::net::TcpListener;
use tracing::info;

use crate::gateway_config::{GatewayConfig, init_tracing};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = GatewayConfig::load()?;

    let http_client = reqwest::Client::builder()
        .build()
        .map_err(|error| AppError::Internal(format!("failed to build http client: {error}")))?;
    let backend_relay = Arc::new(HttpBackendRelay::new(
        http_client,
        config.backend_url.clone(),
    ));
    let app_state = AppState {
        relay_service: RelayService::new(backend_relay),
    };

    let app = gateway_router::build_router(app_state, config.frontend_url.as_deref())?;

    let address = config.socket_address()?;
    let listener = TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind {address}: {error}")))?;

    info!(
        %address,
        backend_host = config.backend_url.host_str().unwrap_or_default(),
        "ppe-portal-gateway listening"
    );

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("server error: {error}")))
}
