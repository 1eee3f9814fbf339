use std::str::FromStr;
use std::sync::Arc;

use ppe_portal_core::{AppError, AppResult};
use ppe_portal_domain::{
    AcknowledgementRecord, Action, ActionEnvelope, BackendReply, DeliveryMode, NewRequestPayload,
    RequestItemsReply, StoremanIssuePayload,
};
use serde_json::json;
use tracing::info;

use crate::relay_ports::EnvelopeSubmitter;

/// Chooses which submitter carries each operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RoutingPolicy {
    /// One-way operations go straight to the backend; lookups go through the gateway.
    #[default]
    Split,
    /// Every operation goes through the gateway and its reply is read.
    ProxyAll,
}

impl RoutingPolicy {
    /// Returns stable configuration value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Split => "split",
            Self::ProxyAll => "proxy_all",
        }
    }
}

impl FromStr for RoutingPolicy {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "split" => Ok(Self::Split),
            "proxy_all" => Ok(Self::ProxyAll),
            other => Err(AppError::Validation(format!(
                "routing policy must be either 'split' or 'proxy_all', got '{other}'"
            ))),
        }
    }
}

/// Named backend operations over the `{action, payload}` envelope.
#[derive(Clone)]
pub struct PpeRequestClient {
    fire_and_forget: Arc<dyn EnvelopeSubmitter>,
    await_response: Arc<dyn EnvelopeSubmitter>,
    routing: RoutingPolicy,
}

impl PpeRequestClient {
    /// Creates a client from the two submit strategies.
    pub fn new(
        fire_and_forget: Arc<dyn EnvelopeSubmitter>,
        await_response: Arc<dyn EnvelopeSubmitter>,
        routing: RoutingPolicy,
    ) -> AppResult<Self> {
        if fire_and_forget.delivery_mode() != DeliveryMode::FireAndForget
            || await_response.delivery_mode() != DeliveryMode::AwaitResponse
        {
            return Err(AppError::Internal(
                "request client submitters were wired in the wrong order".to_owned(),
            ));
        }

        Ok(Self {
            fire_and_forget,
            await_response,
            routing,
        })
    }

    /// Returns the active routing policy.
    #[must_use]
    pub fn routing(&self) -> RoutingPolicy {
        self.routing
    }

    /// Records a new request.
    pub async fn create_request(&self, payload: &NewRequestPayload) -> AppResult<BackendReply> {
        self.submit(Action::CreateRequest, payload).await
    }

    /// Records issued quantities.
    pub async fn storeman_issue(&self, payload: &StoremanIssuePayload) -> AppResult<BackendReply> {
        self.submit(Action::StoremanIssue, payload).await
    }

    /// Records a signed acknowledgement.
    pub async fn acknowledge_receipt(
        &self,
        record: &AcknowledgementRecord,
    ) -> AppResult<BackendReply> {
        self.submit(Action::AcknowledgeReceipt, record).await
    }

    /// Looks up the item lines of a request.
    pub async fn get_request_items(&self, request_id: &str) -> AppResult<RequestItemsReply> {
        let reply = self
            .submit(Action::GetRequestItems, &json!({ "requestId": request_id }))
            .await?;

        Ok(RequestItemsReply::from_reply(&reply))
    }

    fn submitter_for(&self, action: Action) -> &Arc<dyn EnvelopeSubmitter> {
        match (self.routing, action.delivery_mode()) {
            (RoutingPolicy::Split, DeliveryMode::FireAndForget) => &self.fire_and_forget,
            (RoutingPolicy::ProxyAll, _) | (_, DeliveryMode::AwaitResponse) => {
                &self.await_response
            }
        }
    }

    async fn submit(
        &self,
        action: Action,
        payload: &impl serde::Serialize,
    ) -> AppResult<BackendReply> {
        let envelope = ActionEnvelope::new(action, payload)?;
        let submitter = self.submitter_for(action);
        info!(
            action = action.as_str(),
            delivery = ?submitter.delivery_mode(),
            "submitting envelope"
        );

        submitter.submit(&envelope).await
    }
}
