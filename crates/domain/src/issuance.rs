use ppe_portal_core::{AppError, AppResult};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::reply::BackendReply;

/// Backend row identifier, relayed back exactly as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowRef(Value);

impl RowRef {
    /// Wraps a backend row identifier.
    #[must_use]
    pub fn new(value: impl Into<Value>) -> Self {
        Self(value.into())
    }

    /// Returns the identifier as received.
    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

/// One entry of a `getRequestItems` reply.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestItem {
    /// Row in the backend sheet.
    pub row: RowRef,
    /// Item name.
    #[serde(default, deserialize_with = "lenient_text")]
    pub ppe: String,
    /// Quantity originally requested.
    #[serde(default, deserialize_with = "lenient_quantity")]
    pub requested_qty: u32,
}

/// Parsed reply to a `getRequestItems` lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestItemsReply {
    /// Whether the backend reported success.
    pub success: bool,
    /// Item lines of the request.
    pub items: Vec<RequestItem>,
    /// Backend error text, if any.
    pub error: Option<String>,
}

impl RequestItemsReply {
    /// Extracts the item list from a backend reply. Malformed entries are skipped.
    #[must_use]
    pub fn from_reply(reply: &BackendReply) -> Self {
        let items = reply
            .field("items")
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|entry| RequestItem::deserialize(entry).ok())
                    .collect()
            })
            .unwrap_or_default();

        Self {
            success: reply.success,
            items,
            error: reply.error.clone(),
        }
    }
}

/// Issued quantity for one backend row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuanceLine {
    /// Row in the backend sheet.
    pub row: RowRef,
    /// Quantity handed out.
    pub issued_qty: u32,
}

/// `storemanIssue` payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoremanIssuePayload {
    storeman_password: String,
    storeman_name: String,
    issued_date: String,
    items: Vec<IssuanceLine>,
}

impl StoremanIssuePayload {
    /// Builds the payload, requiring at least one line.
    pub fn new(
        storeman_name: impl Into<String>,
        storeman_password: impl Into<String>,
        issued_date: impl Into<String>,
        items: Vec<IssuanceLine>,
    ) -> AppResult<Self> {
        if items.is_empty() {
            return Err(AppError::Validation(
                "No items loaded. Please click \"Load Items\" first.".to_owned(),
            ));
        }

        Ok(Self {
            storeman_password: storeman_password.into(),
            storeman_name: storeman_name.into(),
            issued_date: issued_date.into(),
            items,
        })
    }

    /// Returns the issued lines.
    #[must_use]
    pub fn items(&self) -> &[IssuanceLine] {
        &self.items
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

fn lenient_quantity<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(number) => number
            .as_u64()
            .and_then(|qty| u32::try_from(qty).ok())
            .or_else(|| {
                number
                    .as_f64()
                    .map(|qty| crate::item::coerce_issued_quantity(&qty.to_string()))
            })
            .unwrap_or(0),
        Value::String(text) => crate::item::coerce_issued_quantity(&text),
        _ => 0,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::reply::BackendReply;

    use super::{IssuanceLine, RequestItemsReply, RowRef, StoremanIssuePayload};

    #[test]
    fn lookup_reply_accepts_loose_spreadsheet_values() {
        let reply = BackendReply::from_value(json!({
            "success": true,
            "items": [
                {"row": 5, "ppe": "Safety Helmet", "requestedQty": 2},
                {"row": "7", "ppe": "Gloves", "requestedQty": "3"},
                {"row": 9, "ppe": 42, "requestedQty": "many"},
                "not an item"
            ]
        }));

        let lookup = RequestItemsReply::from_reply(&reply);

        assert!(lookup.success);
        assert_eq!(lookup.items.len(), 3);
        assert_eq!(lookup.items[0].row, RowRef::new(5));
        assert_eq!(lookup.items[0].requested_qty, 2);
        assert_eq!(lookup.items[1].row, RowRef::new("7"));
        assert_eq!(lookup.items[1].requested_qty, 3);
        assert_eq!(lookup.items[2].ppe, "42");
        assert_eq!(lookup.items[2].requested_qty, 0);
    }

    #[test]
    fn lookup_reply_without_items_is_empty() {
        let reply = BackendReply::from_value(json!({"success": false, "error": "Request not found"}));
        let lookup = RequestItemsReply::from_reply(&reply);

        assert!(!lookup.success);
        assert!(lookup.items.is_empty());
        assert_eq!(lookup.error.as_deref(), Some("Request not found"));
    }

    #[test]
    fn issue_payload_relays_row_identifiers_unchanged() {
        let payload = StoremanIssuePayload::new(
            "Ahmad",
            "secret",
            "2025-03-04T00:00:00.000Z",
            vec![
                IssuanceLine { row: RowRef::new(5), issued_qty: 2 },
                IssuanceLine { row: RowRef::new("B7"), issued_qty: 0 },
            ],
        );
        assert!(payload.is_ok());

        let value = serde_json::to_value(payload.unwrap_or_else(|_| unreachable!()));
        assert_eq!(
            value.ok(),
            Some(json!({
                "storemanPassword": "secret",
                "storemanName": "Ahmad",
                "issuedDate": "2025-03-04T00:00:00.000Z",
                "items": [{"row": 5, "issuedQty": 2}, {"row": "B7", "issuedQty": 0}]
            }))
        );
    }

    #[test]
    fn issue_payload_requires_lines() {
        let payload = StoremanIssuePayload::new("Ahmad", "secret", "now", Vec::new());
        assert!(matches!(payload, Err(ref e) if e.detail().starts_with("No items loaded")));
    }
}
