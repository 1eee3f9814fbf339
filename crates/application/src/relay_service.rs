use std::sync::Arc;

use ppe_portal_core::{AppError, AppResult};
use ppe_portal_domain::ActionEnvelope;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::relay_ports::BackendRelay;

/// Stateless gateway relay: validates the envelope, forwards it once, and
/// returns the backend's parsed JSON reply.
#[derive(Clone)]
pub struct RelayService {
    relay: Arc<dyn BackendRelay>,
}

impl RelayService {
    /// Creates a relay service.
    #[must_use]
    pub fn new(relay: Arc<dyn BackendRelay>) -> Self {
        Self { relay }
    }

    /// Relays one raw request body.
    ///
    /// Malformed bodies and missing actions fail before the backend is
    /// contacted. A non-JSON reply fails with the full reply text attached.
    pub async fn relay_body(&self, body: &str) -> AppResult<Value> {
        let envelope = ActionEnvelope::from_body(body)?;
        if envelope.known_action().is_none() {
            debug!(action = envelope.action(), "relaying action outside the known set");
        }

        info!(action = envelope.action(), "relaying envelope to backend");
        let reply = self
            .relay
            .post_envelope(envelope.to_json_text()?)
            .await
            .inspect_err(|error| {
                warn!(action = envelope.action(), error = %error, "backend relay failed");
            })?;

        serde_json::from_str::<Value>(&reply).map_err(|_| {
            warn!(
                action = envelope.action(),
                reply_length = reply.len(),
                "backend reply was not JSON"
            );
            AppError::Protocol {
                message: "Backend did not return JSON".to_owned(),
                raw: reply,
            }
        })
    }
}
