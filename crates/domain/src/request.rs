use std::str::FromStr;

use ppe_portal_core::{AppError, AppResult};
use serde::Serialize;

use crate::item::PpeItemLine;

/// Safety reviewer's decision on a request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum SafetyDecision {
    /// Request may proceed to issuance.
    #[default]
    Approved,
    /// Request is declined.
    Rejected,
}

impl SafetyDecision {
    /// Returns stable wire value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }
}

impl FromStr for SafetyDecision {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(AppError::Validation(format!(
                "safety decision must be 'Approved' or 'Rejected', got '{value}'"
            ))),
        }
    }
}

/// Who is asking for the equipment and why.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestorDetails {
    /// Requestor's full name.
    pub requestor_name: String,
    /// NRIC / FIN number.
    pub nric: String,
    /// Department.
    pub department: String,
    /// Designation.
    pub designation: String,
    /// Contact number.
    pub contact: String,
    /// Email address.
    pub email: String,
    /// Replacement or additional-PPE reason.
    pub reason: String,
}

/// Safety officer's review of a request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetyApproval {
    /// Reviewer's name.
    pub safety_name: String,
    /// Reviewer's access password, checked by the backend.
    pub safety_password: String,
    /// Review decision.
    pub safety_decision: SafetyDecision,
    /// Optional review comments.
    pub safety_comments: String,
}

/// `createRequest` payload.
///
/// Carries the structured `items` list alongside the flattened columns
/// older backend scripts still read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRequestPayload {
    #[serde(flatten)]
    approval: SafetyApproval,
    #[serde(flatten)]
    requestor: RequestorDetails,
    items: Vec<PpeItemLine>,
    ppe_types: Vec<String>,
    ppe_types_requested: String,
    quantity: String,
    requested_quantity: String,
}

impl NewRequestPayload {
    /// Builds the payload, requiring at least one item line.
    pub fn new(
        requestor: RequestorDetails,
        approval: SafetyApproval,
        items: Vec<PpeItemLine>,
    ) -> AppResult<Self> {
        if items.is_empty() {
            return Err(AppError::Validation(
                "Please enter at least one PPE item and quantity.".to_owned(),
            ));
        }

        let ppe_types: Vec<String> = items.iter().map(|item| item.name().to_owned()).collect();
        let quantities = items
            .iter()
            .map(|item| item.qty().to_string())
            .collect::<Vec<_>>()
            .join(", ");

        Ok(Self {
            approval,
            requestor,
            ppe_types_requested: ppe_types.join(", "),
            ppe_types,
            quantity: quantities.clone(),
            requested_quantity: quantities,
            items,
        })
    }

    /// Returns the structured item lines.
    #[must_use]
    pub fn items(&self) -> &[PpeItemLine] {
        &self.items
    }
}
