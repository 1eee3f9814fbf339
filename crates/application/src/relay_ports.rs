use async_trait::async_trait;
use ppe_portal_core::AppResult;
use ppe_portal_domain::{ActionEnvelope, BackendReply, DeliveryMode};

/// Port for the server-side hop from the gateway to the backend.
#[async_trait]
pub trait BackendRelay: Send + Sync {
    /// Posts envelope JSON text to the backend and returns the reply body text.
    ///
    /// Fails only on transport errors; the body is returned whatever the
    /// status code.
    async fn post_envelope(&self, body: String) -> AppResult<String>;
}

/// Port for one way of submitting an envelope from the client side.
#[async_trait]
pub trait EnvelopeSubmitter: Send + Sync {
    /// Returns the delivery mode this strategy implements.
    fn delivery_mode(&self) -> DeliveryMode;

    /// Submits one envelope.
    async fn submit(&self, envelope: &ActionEnvelope) -> AppResult<BackendReply>;
}
