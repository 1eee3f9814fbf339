//! PPE portal terminal front end.

#![forbid(unsafe_code)]

mod console;
mod portal;
mod portal_config;
mod signature_input;

use std::sync::Arc;

use ppe_portal_application::PpeRequestClient;
use ppe_portal_core::AppError;
use ppe_portal_infrastructure::{DirectEnvelopeSubmitter, ProxiedEnvelopeSubmitter};
use tokio::io::BufReader;
use tracing::info;

use crate::console::Console;
use crate::portal::Portal;
use crate::portal_config::{PortalConfig, init_tracing};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = PortalConfig::load()?;
    let client = build_request_client(&config)?;
    info!(
        routing = config.routing.as_str(),
        gateway_url = %config.gateway_url,
        "ppe-portal started"
    );

    let console = Console::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout());
    Portal::new(console, client).run().await
}

fn build_request_client(config: &PortalConfig) -> Result<PpeRequestClient, AppError> {
    let http_client = reqwest::Client::builder()
        .build()
        .map_err(|error| AppError::Internal(format!("failed to build http client: {error}")))?;

    PpeRequestClient::new(
        Arc::new(DirectEnvelopeSubmitter::new(
            http_client.clone(),
            config.backend_url.clone(),
        )),
        Arc::new(ProxiedEnvelopeSubmitter::new(
            http_client,
            config.gateway_url.clone(),
        )),
        config.routing,
    )
}
