use ppe_portal_core::{AppError, AppResult};
use serde::Serialize;

/// `acknowledgeReceipt` payload: a requestor's signed confirmation of receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AcknowledgementRecord {
    request_id: String,
    signature_name: String,
    ack_date: String,
    signature_data_url: String,
}

impl AcknowledgementRecord {
    /// Builds a record; request id, name and signature must be present.
    pub fn new(
        request_id: impl Into<String>,
        signature_name: impl Into<String>,
        ack_date: impl Into<String>,
        signature_data_url: impl Into<String>,
    ) -> AppResult<Self> {
        let record = Self {
            request_id: request_id.into(),
            signature_name: signature_name.into(),
            ack_date: ack_date.into(),
            signature_data_url: signature_data_url.into(),
        };

        if record.request_id.trim().is_empty() || record.signature_name.trim().is_empty() {
            return Err(AppError::Validation(
                "Request ID and full name are required.".to_owned(),
            ));
        }
        if record.signature_data_url.is_empty() {
            return Err(AppError::Validation("Please sign before confirming.".to_owned()));
        }

        Ok(record)
    }

    /// Returns the acknowledged request id.
    #[must_use]
    pub fn request_id(&self) -> &str {
        &self.request_id
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::AcknowledgementRecord;

    #[test]
    fn record_serializes_with_camel_case_fields() {
        let record = AcknowledgementRecord::new(
            "PPE-2025-0001",
            "Tan Wei",
            "2025-03-04T00:00:00.000Z",
            "data:image/svg+xml;base64,PHN2Zy8+",
        );
        assert!(record.is_ok());

        let value = serde_json::to_value(record.unwrap_or_else(|_| unreachable!()));
        assert_eq!(
            value.ok(),
            Some(json!({
                "requestId": "PPE-2025-0001",
                "signatureName": "Tan Wei",
                "ackDate": "2025-03-04T00:00:00.000Z",
                "signatureDataUrl": "data:image/svg+xml;base64,PHN2Zy8+"
            }))
        );
    }

    #[test]
    fn record_requires_signature_and_identity() {
        assert!(AcknowledgementRecord::new("", "Tan", "d", "data:x").is_err());
        assert!(AcknowledgementRecord::new("PPE-1", " ", "d", "data:x").is_err());
        assert!(AcknowledgementRecord::new("PPE-1", "Tan", "d", "").is_err());
    }
}
