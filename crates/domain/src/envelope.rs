use std::str::FromStr;

use ppe_portal_core::{AppError, AppResult, NonEmptyString};
use serde::Serialize;
use serde_json::{Map, Value};

/// How an operation's envelope reaches the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryMode {
    /// Sent without waiting for or reading the backend reply.
    FireAndForget,
    /// Relayed through the gateway so the reply can be parsed.
    AwaitResponse,
}

/// Operations the backend understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Records a new PPE request with its safety approval.
    CreateRequest,
    /// Records the storeman's issued quantities.
    StoremanIssue,
    /// Records the requestor's signed acknowledgement.
    AcknowledgeReceipt,
    /// Looks up the item lines of one request.
    GetRequestItems,
}

impl Action {
    /// Every known action.
    pub const ALL: [Self; 4] = [
        Self::CreateRequest,
        Self::StoremanIssue,
        Self::AcknowledgeReceipt,
        Self::GetRequestItems,
    ];

    /// Returns stable wire value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreateRequest => "createRequest",
            Self::StoremanIssue => "storemanIssue",
            Self::AcknowledgeReceipt => "acknowledgeReceipt",
            Self::GetRequestItems => "getRequestItems",
        }
    }

    /// Returns the delivery mode this operation needs.
    #[must_use]
    pub fn delivery_mode(&self) -> DeliveryMode {
        match self {
            Self::GetRequestItems => DeliveryMode::AwaitResponse,
            Self::CreateRequest | Self::StoremanIssue | Self::AcknowledgeReceipt => {
                DeliveryMode::FireAndForget
            }
        }
    }
}

impl FromStr for Action {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == value)
            .ok_or_else(|| AppError::Validation(format!("unknown action '{value}'")))
    }
}

/// The `{action, payload}` wrapper shared by every backend operation.
///
/// An absent payload stays absent on the wire; an explicit `null` is kept.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionEnvelope {
    action: NonEmptyString,
    #[serde(skip_serializing_if = "Option::is_none")]
    payload: Option<Value>,
}

impl ActionEnvelope {
    /// Creates an envelope for a known action.
    pub fn new(action: Action, payload: &impl Serialize) -> AppResult<Self> {
        let payload = serde_json::to_value(payload).map_err(|error| {
            AppError::Internal(format!(
                "failed to encode payload for '{}': {error}",
                action.as_str()
            ))
        })?;

        Ok(Self {
            action: NonEmptyString::new(action.as_str())?,
            payload: Some(payload),
        })
    }

    /// Parses a raw request body received by the gateway.
    ///
    /// An empty body counts as `{}`. Bodies that are not JSON objects, or
    /// whose `action` is not a non-blank string, have no action.
    pub fn from_body(body: &str) -> AppResult<Self> {
        let trimmed = body.trim();
        let value = if trimmed.is_empty() {
            Value::Object(Map::new())
        } else {
            serde_json::from_str::<Value>(trimmed)
                .map_err(|_| AppError::Validation("Invalid JSON body".to_owned()))?
        };

        let Value::Object(mut fields) = value else {
            return Err(missing_action());
        };

        let action = match fields.remove("action") {
            Some(Value::String(action)) => {
                NonEmptyString::new(action).map_err(|_| missing_action())?
            }
            _ => return Err(missing_action()),
        };

        Ok(Self {
            action,
            payload: fields.remove("payload"),
        })
    }

    /// Returns the raw action name.
    #[must_use]
    pub fn action(&self) -> &str {
        self.action.as_str()
    }

    /// Returns the action when it belongs to the known set.
    #[must_use]
    pub fn known_action(&self) -> Option<Action> {
        self.action().parse().ok()
    }

    /// Returns the payload, if one was supplied.
    #[must_use]
    pub fn payload(&self) -> Option<&Value> {
        self.payload.as_ref()
    }

    /// Encodes the envelope as the JSON text sent to the backend.
    pub fn to_json_text(&self) -> AppResult<String> {
        serde_json::to_string(self)
            .map_err(|error| AppError::Internal(format!("failed to encode envelope: {error}")))
    }
}

fn missing_action() -> AppError {
    AppError::Validation("Missing action".to_owned())
}
