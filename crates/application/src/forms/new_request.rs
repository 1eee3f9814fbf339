use ppe_portal_core::AppResult;
use ppe_portal_domain::{
    ItemRowInput, NewRequestPayload, RequestorDetails, SafetyApproval, normalize_item_rows,
};
use tracing::warn;

use super::{FormOutcome, require_field};
use crate::request_client::PpeRequestClient;

/// New PPE request with its safety approval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRequestForm {
    /// Requestor section.
    pub requestor: RequestorDetails,
    /// Safety approval section.
    pub approval: SafetyApproval,
    items: Vec<ItemRowInput>,
    outcome: Option<FormOutcome>,
}

impl Default for NewRequestForm {
    fn default() -> Self {
        Self {
            requestor: RequestorDetails::default(),
            approval: SafetyApproval::default(),
            items: vec![ItemRowInput::default()],
            outcome: None,
        }
    }
}

impl NewRequestForm {
    /// Creates an empty form with one blank item row.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the item rows as typed.
    #[must_use]
    pub fn item_rows(&self) -> &[ItemRowInput] {
        &self.items
    }

    /// Appends a blank item row and returns its index.
    pub fn add_item_row(&mut self) -> usize {
        self.items.push(ItemRowInput::default());
        self.items.len() - 1
    }

    /// Removes one item row. The last remaining row is never removed.
    pub fn remove_item_row(&mut self, index: usize) -> bool {
        if self.items.len() <= 1 || index >= self.items.len() {
            return false;
        }

        self.items.remove(index);
        true
    }

    /// Sets the item name of one row.
    pub fn set_item_name(&mut self, index: usize, name: impl Into<String>) -> bool {
        self.items
            .get_mut(index)
            .map(|row| row.name = name.into())
            .is_some()
    }

    /// Sets the quantity text of one row.
    pub fn set_item_qty(&mut self, index: usize, qty: impl Into<String>) -> bool {
        self.items
            .get_mut(index)
            .map(|row| row.qty = qty.into())
            .is_some()
    }

    /// Returns the last submission outcome.
    #[must_use]
    pub fn outcome(&self) -> Option<&FormOutcome> {
        self.outcome.as_ref()
    }

    /// Builds the `createRequest` payload from the current fields.
    ///
    /// Blank item rows are dropped first; the request is rejected when none
    /// remain, then required fields are presence-checked.
    pub fn build_payload(&self) -> AppResult<NewRequestPayload> {
        let items = normalize_item_rows(&self.items);
        let payload = NewRequestPayload::new(self.requestor.clone(), self.approval.clone(), items)?;

        let requestor = &self.requestor;
        require_field(&requestor.requestor_name, "Name")?;
        require_field(&requestor.nric, "NRIC / FIN No")?;
        require_field(&requestor.department, "Department")?;
        require_field(&requestor.designation, "Designation")?;
        require_field(&requestor.contact, "Contact No.")?;
        require_field(&requestor.email, "Email")?;
        require_field(&requestor.reason, "Reason for Request")?;
        require_field(&self.approval.safety_name, "Safety Name")?;
        require_field(&self.approval.safety_password, "Safety Access Password")?;

        Ok(payload)
    }

    /// Submits the request. On success every field resets to one blank row.
    pub async fn submit(&mut self, client: &PpeRequestClient) -> &FormOutcome {
        let outcome = match self.build_payload() {
            Err(error) => FormOutcome::from_error(&error),
            Ok(payload) => match client.create_request(&payload).await {
                Ok(reply) => FormOutcome::from_reply(&reply),
                Err(error) => {
                    warn!(error = %error, "create request submission failed");
                    FormOutcome::from_error(&error)
                }
            },
        };

        if outcome.is_success() {
            *self = Self::default();
        }

        self.outcome.insert(outcome)
    }
}
