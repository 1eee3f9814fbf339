use std::sync::Arc;

use async_trait::async_trait;
use ppe_portal_core::{AppError, AppResult};
use ppe_portal_domain::{ActionEnvelope, BackendReply, DeliveryMode};
use serde_json::{Value, json};
use tokio::sync::Mutex;

use crate::relay_ports::EnvelopeSubmitter;
use crate::request_client::{PpeRequestClient, RoutingPolicy};

pub(crate) struct RecordingSubmitter {
    mode: DeliveryMode,
    reply: Result<Value, String>,
    envelopes: Mutex<Vec<Value>>,
}

impl RecordingSubmitter {
    pub(crate) fn new(mode: DeliveryMode, reply: Value) -> Arc<Self> {
        Arc::new(Self {
            mode,
            reply: Ok(reply),
            envelopes: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn accepting() -> Arc<Self> {
        Self::new(DeliveryMode::FireAndForget, json!({"success": true}))
    }

    pub(crate) fn failing(mode: DeliveryMode, error: &str) -> Arc<Self> {
        Arc::new(Self {
            mode,
            reply: Err(error.to_owned()),
            envelopes: Mutex::new(Vec::new()),
        })
    }

    pub(crate) async fn envelopes(&self) -> Vec<Value> {
        self.envelopes.lock().await.clone()
    }
}

#[async_trait]
impl EnvelopeSubmitter for RecordingSubmitter {
    fn delivery_mode(&self) -> DeliveryMode {
        self.mode
    }

    async fn submit(&self, envelope: &ActionEnvelope) -> AppResult<BackendReply> {
        let encoded = serde_json::to_value(envelope)
            .map_err(|error| AppError::Internal(error.to_string()))?;
        self.envelopes.lock().await.push(encoded);

        self.reply
            .clone()
            .map(BackendReply::from_value)
            .map_err(AppError::Transport)
    }
}

pub(crate) fn split_client(
    direct: Arc<RecordingSubmitter>,
    proxied: Arc<RecordingSubmitter>,
) -> PpeRequestClient {
    let client = PpeRequestClient::new(direct, proxied, RoutingPolicy::Split);
    assert!(client.is_ok());
    client.unwrap_or_else(|_| unreachable!())
}
