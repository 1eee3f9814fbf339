use chrono::{NaiveDate, Utc};
use ppe_portal_core::{AppError, AppResult};
use ppe_portal_domain::{AcknowledgementRecord, SignaturePad, iso_timestamp_for_date};
use tracing::warn;

use super::FormOutcome;
use crate::request_client::PpeRequestClient;

/// Requestor acknowledgement with a hand-drawn signature.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AcknowledgeForm {
    /// Request being acknowledged.
    pub request_id: String,
    /// Full name recorded with the signature.
    pub signature_name: String,
    /// Receipt date; defaults to now on submit.
    pub ack_date: Option<NaiveDate>,
    /// Signature drawn so far.
    pub signature: SignaturePad,
    outcome: Option<FormOutcome>,
}

impl AcknowledgeForm {
    /// Creates an empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether confirming is enabled.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.signature.is_empty()
            && !self.request_id.trim().is_empty()
            && !self.signature_name.trim().is_empty()
    }

    /// Returns the last submission outcome.
    #[must_use]
    pub fn outcome(&self) -> Option<&FormOutcome> {
        self.outcome.as_ref()
    }

    /// Builds the acknowledgement record, serializing the signature.
    pub fn build_record(&self) -> AppResult<AcknowledgementRecord> {
        if !self.can_submit() {
            return Err(AppError::Validation(
                "Sign and fill in the Request ID and full name before confirming.".to_owned(),
            ));
        }

        AcknowledgementRecord::new(
            self.request_id.clone(),
            self.signature_name.clone(),
            iso_timestamp_for_date(self.ack_date, Utc::now()),
            self.signature.to_data_url().unwrap_or_default(),
        )
    }

    /// Submits the acknowledgement. Nothing is sent while confirming is disabled.
    pub async fn submit(&mut self, client: &PpeRequestClient) -> &FormOutcome {
        let outcome = match self.build_record() {
            Err(error) => FormOutcome::from_error(&error),
            Ok(record) => match client.acknowledge_receipt(&record).await {
                Ok(reply) => FormOutcome::from_reply(&reply),
                Err(error) => {
                    warn!(
                        request_id = record.request_id(),
                        error = %error,
                        "acknowledgement submission failed"
                    );
                    FormOutcome::from_error(&error)
                }
            },
        };

        self.outcome.insert(outcome)
    }
}
