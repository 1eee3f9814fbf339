use async_trait::async_trait;
use ppe_portal_application::EnvelopeSubmitter;
use ppe_portal_core::{AppError, AppResult};
use ppe_portal_domain::{ActionEnvelope, BackendReply, DeliveryMode};
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::ENVELOPE_CONTENT_TYPE;

/// Longest raw excerpt kept when the gateway answers with something other than JSON.
const RAW_EXCERPT_CHARS: usize = 200;

/// Fire-and-forget strategy: posts straight to the backend and never reads the reply.
#[derive(Clone)]
pub struct DirectEnvelopeSubmitter {
    http_client: reqwest::Client,
    backend_url: Url,
}

impl DirectEnvelopeSubmitter {
    /// Creates a submitter targeting the backend URL.
    #[must_use]
    pub fn new(http_client: reqwest::Client, backend_url: Url) -> Self {
        Self {
            http_client,
            backend_url,
        }
    }
}

#[async_trait]
impl EnvelopeSubmitter for DirectEnvelopeSubmitter {
    fn delivery_mode(&self) -> DeliveryMode {
        DeliveryMode::FireAndForget
    }

    async fn submit(&self, envelope: &ActionEnvelope) -> AppResult<BackendReply> {
        debug!(action = envelope.action(), "posting envelope directly to backend");
        self.http_client
            .post(self.backend_url.clone())
            .header(CONTENT_TYPE, ENVELOPE_CONTENT_TYPE)
            .body(envelope.to_json_text()?)
            .send()
            .await
            .map_err(|error| AppError::Transport(error.to_string()))?;

        Ok(BackendReply::accepted())
    }
}

/// Relayed strategy: posts through the gateway and parses its JSON reply.
#[derive(Clone)]
pub struct ProxiedEnvelopeSubmitter {
    http_client: reqwest::Client,
    gateway_url: Url,
}

impl ProxiedEnvelopeSubmitter {
    /// Creates a submitter targeting the gateway URL.
    #[must_use]
    pub fn new(http_client: reqwest::Client, gateway_url: Url) -> Self {
        Self {
            http_client,
            gateway_url,
        }
    }
}

#[async_trait]
impl EnvelopeSubmitter for ProxiedEnvelopeSubmitter {
    fn delivery_mode(&self) -> DeliveryMode {
        DeliveryMode::AwaitResponse
    }

    async fn submit(&self, envelope: &ActionEnvelope) -> AppResult<BackendReply> {
        let response = self
            .http_client
            .post(self.gateway_url.clone())
            .header(CONTENT_TYPE, ENVELOPE_CONTENT_TYPE)
            .body(envelope.to_json_text()?)
            .send()
            .await
            .map_err(|error| AppError::Transport(error.to_string()))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|error| AppError::Transport(format!("failed to read gateway reply: {error}")))?;
        debug!(action = envelope.action(), %status, "gateway replied");

        match serde_json::from_str::<Value>(&text) {
            Ok(value) => Ok(BackendReply::from_value(value)),
            Err(_) => {
                warn!(action = envelope.action(), %status, "gateway reply was not JSON");
                Ok(BackendReply::failure(
                    "Server did not return JSON",
                    Some(text.chars().take(RAW_EXCERPT_CHARS).collect()),
                ))
            }
        }
    }
}
