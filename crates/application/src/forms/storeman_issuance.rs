use chrono::{NaiveDate, Utc};
use ppe_portal_core::AppResult;
use ppe_portal_domain::{
    IssuanceLine, RequestItem, RowRef, StoremanIssuePayload, coerce_issued_quantity,
    iso_timestamp_for_date,
};
use tracing::{info, warn};

use super::{FormOutcome, require_field};
use crate::request_client::PpeRequestClient;

/// One loaded request line with the quantity being issued.
#[derive(Debug, Clone, PartialEq)]
pub struct IssuanceDraftLine {
    /// Backend row identifier.
    pub row: RowRef,
    /// Item name.
    pub ppe: String,
    /// Quantity originally requested.
    pub requested_qty: u32,
    /// Quantity to issue, as typed.
    pub issued_qty: String,
}

impl From<RequestItem> for IssuanceDraftLine {
    fn from(item: RequestItem) -> Self {
        Self {
            row: item.row,
            ppe: item.ppe,
            requested_qty: item.requested_qty,
            issued_qty: item.requested_qty.to_string(),
        }
    }
}

/// Storeman issuance: load a request's lines, adjust quantities, submit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoremanIssuanceForm {
    /// Request being issued.
    pub request_id: String,
    /// Storeman's name.
    pub storeman_name: String,
    /// Storeman's access password, checked by the backend.
    pub storeman_password: String,
    /// Chosen issuance date; defaults to now on submit.
    pub issued_date: Option<NaiveDate>,
    lines: Vec<IssuanceDraftLine>,
    outcome: Option<FormOutcome>,
}

impl StoremanIssuanceForm {
    /// Creates an empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the loaded lines.
    #[must_use]
    pub fn lines(&self) -> &[IssuanceDraftLine] {
        &self.lines
    }

    /// Returns the last load or submission outcome.
    #[must_use]
    pub fn outcome(&self) -> Option<&FormOutcome> {
        self.outcome.as_ref()
    }

    /// Sets the quantity to issue for one loaded line.
    pub fn set_issued_qty(&mut self, index: usize, qty: impl Into<String>) -> bool {
        self.lines
            .get_mut(index)
            .map(|line| line.issued_qty = qty.into())
            .is_some()
    }

    /// Loads the request's lines, defaulting issued quantities to the
    /// requested ones. Returns the number of lines loaded.
    ///
    /// Previous lines and outcome are always cleared; a blank request id
    /// then stops without a lookup. Any failure leaves the line list empty
    /// and records the failure as the outcome.
    pub async fn load_items(&mut self, client: &PpeRequestClient) -> usize {
        self.outcome = None;
        self.lines.clear();

        let request_id = self.request_id.trim().to_owned();
        if request_id.is_empty() {
            return 0;
        }

        match client.get_request_items(&request_id).await {
            Ok(reply) if reply.success && reply.items.is_empty() => {
                self.outcome = Some(FormOutcome::failed("No items found for this Request ID."));
            }
            Ok(reply) if reply.success => {
                self.lines = reply.items.into_iter().map(IssuanceDraftLine::from).collect();
                info!(request_id = %request_id, lines = self.lines.len(), "loaded request items");
            }
            Ok(reply) => {
                self.outcome = Some(FormOutcome::failed(
                    reply
                        .error
                        .unwrap_or_else(|| "Failed to load items.".to_owned()),
                ));
            }
            Err(error) => {
                warn!(request_id = %request_id, error = %error, "request item lookup failed");
                self.outcome = Some(FormOutcome::from_error(&error));
            }
        }

        self.lines.len()
    }

    /// Builds the `storemanIssue` payload from the loaded lines.
    pub fn build_payload(&self) -> AppResult<StoremanIssuePayload> {
        let items = self
            .lines
            .iter()
            .map(|line| IssuanceLine {
                row: line.row.clone(),
                issued_qty: coerce_issued_quantity(&line.issued_qty),
            })
            .collect();
        let issued_date = iso_timestamp_for_date(self.issued_date, Utc::now());
        let payload = StoremanIssuePayload::new(
            self.storeman_name.clone(),
            self.storeman_password.clone(),
            issued_date,
            items,
        )?;

        require_field(&self.request_id, "Request ID")?;
        require_field(&self.storeman_name, "Storeman Name")?;
        require_field(&self.storeman_password, "Storeman Access Password")?;

        Ok(payload)
    }

    /// Submits the issuance. Nothing is sent until lines have been loaded.
    pub async fn submit(&mut self, client: &PpeRequestClient) -> &FormOutcome {
        let outcome = match self.build_payload() {
            Err(error) => FormOutcome::from_error(&error),
            Ok(payload) => match client.storeman_issue(&payload).await {
                Ok(reply) => FormOutcome::from_reply(&reply),
                Err(error) => {
                    warn!(error = %error, "storeman issuance submission failed");
                    FormOutcome::from_error(&error)
                }
            },
        };

        self.outcome.insert(outcome)
    }
}
