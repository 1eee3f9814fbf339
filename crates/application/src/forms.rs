//! Workflow forms: each collects its fields, normalizes them, and submits
//! through one request client operation. Failures are kept as inline
//! outcomes instead of being propagated.

mod acknowledge;
mod new_request;
mod storeman_issuance;

use ppe_portal_core::{AppError, AppResult};
use ppe_portal_domain::BackendReply;

pub use acknowledge::AcknowledgeForm;
pub use new_request::NewRequestForm;
pub use storeman_issuance::{IssuanceDraftLine, StoremanIssuanceForm};

/// Result of the last form submission, shown inline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    /// The submission was accepted.
    Saved {
        /// Request identifier returned by the backend, if any.
        request_id: Option<String>,
        /// Backend status text, if any.
        status: Option<String>,
    },
    /// The submission failed and must be retried manually.
    Failed {
        /// Failure text.
        message: String,
    },
}

impl FormOutcome {
    /// Interprets a backend reply.
    #[must_use]
    pub fn from_reply(reply: &BackendReply) -> Self {
        if reply.success {
            return Self::Saved {
                request_id: reply.request_id().map(str::to_owned),
                status: reply.status(),
            };
        }

        Self::failed(
            reply
                .error
                .clone()
                .unwrap_or_else(|| "Unknown error".to_owned()),
        )
    }

    /// Wraps a local or transport error.
    #[must_use]
    pub fn from_error(error: &AppError) -> Self {
        Self::failed(error.detail())
    }

    /// Builds a failure outcome.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }

    /// Returns whether the submission was accepted.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Saved { .. })
    }
}

fn require_field(value: &str, label: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{label} is required.")));
    }

    Ok(())
}

#[cfg(test)]
mod tests;
