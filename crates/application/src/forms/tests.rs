use chrono::{DateTime, NaiveDate};
use ppe_portal_domain::{DeliveryMode, SignaturePoint};
use serde_json::json;

use crate::test_support::{RecordingSubmitter, split_client};

use super::{AcknowledgeForm, FormOutcome, NewRequestForm, StoremanIssuanceForm};

fn filled_request_form() -> NewRequestForm {
    let mut form = NewRequestForm::new();
    form.requestor.requestor_name = "Tan Wei".to_owned();
    form.requestor.nric = "S1234567A".to_owned();
    form.requestor.department = "Maintenance".to_owned();
    form.requestor.designation = "Technician".to_owned();
    form.requestor.contact = "91234567".to_owned();
    form.requestor.email = "tan.wei@example.com".to_owned();
    form.requestor.reason = "Replacement (Damaged)".to_owned();
    form.approval.safety_name = "Lim".to_owned();
    form.approval.safety_password = "safety-pass".to_owned();
    form
}

#[tokio::test]
async fn new_request_drops_blank_rows_and_flattens_legacy_fields() {
    let direct = RecordingSubmitter::accepting();
    let proxied = RecordingSubmitter::new(DeliveryMode::AwaitResponse, json!({}));
    let client = split_client(direct.clone(), proxied);

    let mut form = filled_request_form();
    assert!(form.set_item_name(0, "Helmet"));
    assert!(form.set_item_qty(0, "2"));
    let blank = form.add_item_row();
    assert_eq!(blank, 1);

    let outcome = form.submit(&client).await.clone();

    assert!(outcome.is_success());
    let envelopes = direct.envelopes().await;
    assert_eq!(envelopes.len(), 1);
    let payload = &envelopes[0]["payload"];
    assert_eq!(envelopes[0]["action"], json!("createRequest"));
    assert_eq!(payload["items"], json!([{"name": "Helmet", "qty": 2}]));
    assert_eq!(payload["ppeTypes"], json!(["Helmet"]));
    assert_eq!(payload["ppeTypesRequested"], json!("Helmet"));
    assert_eq!(payload["quantity"], json!("2"));
    assert_eq!(payload["requestedQuantity"], json!("2"));
    assert_eq!(payload["safetyDecision"], json!("Approved"));
    assert_eq!(payload["safetyPassword"], json!("safety-pass"));
}

#[tokio::test]
async fn new_request_resets_after_success() {
    let direct = RecordingSubmitter::accepting();
    let proxied = RecordingSubmitter::new(DeliveryMode::AwaitResponse, json!({}));
    let client = split_client(direct, proxied);

    let mut form = filled_request_form();
    form.set_item_name(0, "Gloves");
    form.set_item_qty(0, "3");
    form.add_item_row();
    form.submit(&client).await;

    assert_eq!(form.item_rows().len(), 1);
    assert!(form.item_rows()[0].name.is_empty());
    assert!(form.requestor.requestor_name.is_empty());
    assert_eq!(
        form.outcome(),
        Some(&FormOutcome::Saved {
            request_id: None,
            status: None
        })
    );
}

#[tokio::test]
async fn new_request_without_items_is_rejected_locally() {
    let direct = RecordingSubmitter::accepting();
    let proxied = RecordingSubmitter::new(DeliveryMode::AwaitResponse, json!({}));
    let client = split_client(direct.clone(), proxied);

    let mut form = filled_request_form();
    form.set_item_name(0, "Helmet");
    let outcome = form.submit(&client).await.clone();

    assert_eq!(
        outcome,
        FormOutcome::failed("Please enter at least one PPE item and quantity.")
    );
    assert!(direct.envelopes().await.is_empty());
    assert_eq!(form.item_rows()[0].name, "Helmet");
}

#[tokio::test]
async fn new_request_requires_identity_fields() {
    let direct = RecordingSubmitter::accepting();
    let proxied = RecordingSubmitter::new(DeliveryMode::AwaitResponse, json!({}));
    let client = split_client(direct.clone(), proxied);

    let mut form = filled_request_form();
    form.requestor.nric = "  ".to_owned();
    form.set_item_name(0, "Helmet");
    form.set_item_qty(0, "1");
    let outcome = form.submit(&client).await.clone();

    assert_eq!(outcome, FormOutcome::failed("NRIC / FIN No is required."));
    assert!(direct.envelopes().await.is_empty());
}

#[tokio::test]
async fn new_request_keeps_fields_when_transport_fails() {
    let direct = RecordingSubmitter::failing(DeliveryMode::FireAndForget, "error sending request");
    let proxied = RecordingSubmitter::new(DeliveryMode::AwaitResponse, json!({}));
    let client = split_client(direct, proxied);

    let mut form = filled_request_form();
    form.set_item_name(0, "Helmet");
    form.set_item_qty(0, "1");
    let outcome = form.submit(&client).await.clone();

    assert_eq!(outcome, FormOutcome::failed("error sending request"));
    assert_eq!(form.requestor.requestor_name, "Tan Wei");
}

#[test]
fn item_rows_keep_at_least_one_row() {
    let mut form = NewRequestForm::new();
    assert!(!form.remove_item_row(0));

    form.add_item_row();
    assert!(form.remove_item_row(0));
    assert_eq!(form.item_rows().len(), 1);
    assert!(!form.remove_item_row(5));
    assert!(!form.set_item_qty(3, "1"));
}

#[tokio::test]
async fn storeman_submit_without_loaded_items_never_calls_backend() {
    let direct = RecordingSubmitter::accepting();
    let proxied = RecordingSubmitter::new(DeliveryMode::AwaitResponse, json!({}));
    let client = split_client(direct.clone(), proxied.clone());

    let mut form = StoremanIssuanceForm::new();
    form.request_id = "PPE-2025-0001".to_owned();
    let outcome = form.submit(&client).await.clone();

    assert_eq!(
        outcome,
        FormOutcome::failed("No items loaded. Please click \"Load Items\" first.")
    );
    assert!(direct.envelopes().await.is_empty());
    assert!(proxied.envelopes().await.is_empty());
}

#[tokio::test]
async fn storeman_load_defaults_issued_to_requested_quantity() {
    let direct = RecordingSubmitter::accepting();
    let proxied = RecordingSubmitter::new(
        DeliveryMode::AwaitResponse,
        json!({"success": true, "items": [
            {"row": 12, "ppe": "Safety Shoes", "requestedQty": 2},
            {"row": 13, "ppe": "Coverall", "requestedQty": "1"}
        ]}),
    );
    let client = split_client(direct.clone(), proxied.clone());

    let mut form = StoremanIssuanceForm::new();
    form.request_id = "  PPE-2025-0001 ".to_owned();
    let loaded = form.load_items(&client).await;

    assert_eq!(loaded, 2);
    assert_eq!(form.lines()[0].issued_qty, "2");
    assert_eq!(form.lines()[1].issued_qty, "1");
    assert_eq!(form.outcome(), None);
    assert_eq!(
        proxied.envelopes().await[0]["payload"],
        json!({"requestId": "PPE-2025-0001"})
    );

    form.storeman_name = "Ahmad".to_owned();
    form.storeman_password = "store-pass".to_owned();
    form.issued_date = NaiveDate::from_ymd_opt(2025, 3, 4);
    assert!(form.set_issued_qty(0, "1"));
    assert!(form.set_issued_qty(1, "not a number"));
    let outcome = form.submit(&client).await.clone();

    assert!(outcome.is_success());
    let envelopes = direct.envelopes().await;
    assert_eq!(
        envelopes,
        vec![json!({
            "action": "storemanIssue",
            "payload": {
                "storemanPassword": "store-pass",
                "storemanName": "Ahmad",
                "issuedDate": "2025-03-04T00:00:00.000Z",
                "items": [{"row": 12, "issuedQty": 1}, {"row": 13, "issuedQty": 0}]
            }
        })]
    );
}

#[tokio::test]
async fn storeman_issue_date_defaults_to_now() {
    let direct = RecordingSubmitter::accepting();
    let proxied = RecordingSubmitter::new(
        DeliveryMode::AwaitResponse,
        json!({"success": true, "items": [{"row": 1, "ppe": "Vest", "requestedQty": 1}]}),
    );
    let client = split_client(direct.clone(), proxied);

    let mut form = StoremanIssuanceForm::new();
    form.request_id = "PPE-2025-0002".to_owned();
    form.storeman_name = "Ahmad".to_owned();
    form.storeman_password = "store-pass".to_owned();
    form.load_items(&client).await;
    form.submit(&client).await;

    let envelopes = direct.envelopes().await;
    let issued_date = envelopes[0]["payload"]["issuedDate"].as_str().unwrap_or_default();
    assert!(DateTime::parse_from_rfc3339(issued_date).is_ok());
    assert!(issued_date.ends_with('Z'));
}

#[tokio::test]
async fn storeman_load_reports_empty_and_failed_lookups() {
    let direct = RecordingSubmitter::accepting();
    let empty = RecordingSubmitter::new(DeliveryMode::AwaitResponse, json!({"success": true, "items": []}));
    let client = split_client(direct.clone(), empty);

    let mut form = StoremanIssuanceForm::new();
    form.request_id = "PPE-2025-0404".to_owned();
    assert_eq!(form.load_items(&client).await, 0);
    assert_eq!(
        form.outcome(),
        Some(&FormOutcome::failed("No items found for this Request ID."))
    );

    let rejected = RecordingSubmitter::new(DeliveryMode::AwaitResponse, json!({"success": false}));
    let client = split_client(direct.clone(), rejected);
    assert_eq!(form.load_items(&client).await, 0);
    assert_eq!(form.outcome(), Some(&FormOutcome::failed("Failed to load items.")));

    let not_json = RecordingSubmitter::new(
        DeliveryMode::AwaitResponse,
        json!({"success": false, "error": "Server did not return JSON", "raw": "<html>"}),
    );
    let client = split_client(direct, not_json);
    assert_eq!(form.load_items(&client).await, 0);
    assert_eq!(
        form.outcome(),
        Some(&FormOutcome::failed("Server did not return JSON"))
    );
    assert!(form.lines().is_empty());
}

#[tokio::test]
async fn storeman_blank_reload_clears_previous_lines() {
    let direct = RecordingSubmitter::accepting();
    let proxied = RecordingSubmitter::new(
        DeliveryMode::AwaitResponse,
        json!({"success": true, "items": [{"row": 3, "ppe": "Gloves", "requestedQty": 4}]}),
    );
    let client = split_client(direct.clone(), proxied.clone());

    let mut form = StoremanIssuanceForm::new();
    form.request_id = "PPE-2025-0001".to_owned();
    form.storeman_name = "Ahmad".to_owned();
    form.storeman_password = "store-pass".to_owned();
    assert_eq!(form.load_items(&client).await, 1);

    form.request_id = "   ".to_owned();
    assert_eq!(form.load_items(&client).await, 0);
    assert!(form.lines().is_empty());
    assert_eq!(form.outcome(), None);
    assert_eq!(proxied.envelopes().await.len(), 1);

    let outcome = form.submit(&client).await.clone();
    assert_eq!(
        outcome,
        FormOutcome::failed("No items loaded. Please click \"Load Items\" first.")
    );
    assert!(direct.envelopes().await.is_empty());
}

#[tokio::test]
async fn storeman_submit_requires_request_id() {
    let direct = RecordingSubmitter::accepting();
    let proxied = RecordingSubmitter::new(
        DeliveryMode::AwaitResponse,
        json!({"success": true, "items": [{"row": 3, "ppe": "Gloves", "requestedQty": 4}]}),
    );
    let client = split_client(direct.clone(), proxied);

    let mut form = StoremanIssuanceForm::new();
    form.request_id = "PPE-2025-0001".to_owned();
    form.storeman_name = "Ahmad".to_owned();
    form.storeman_password = "store-pass".to_owned();
    form.load_items(&client).await;
    form.request_id.clear();

    let outcome = form.submit(&client).await.clone();

    assert_eq!(outcome, FormOutcome::failed("Request ID is required."));
    assert!(direct.envelopes().await.is_empty());
}

#[tokio::test]
async fn acknowledge_is_disabled_until_signed_and_identified() {
    let direct = RecordingSubmitter::accepting();
    let proxied = RecordingSubmitter::new(DeliveryMode::AwaitResponse, json!({}));
    let client = split_client(direct.clone(), proxied);

    let mut form = AcknowledgeForm::new();
    form.request_id = "PPE-2025-0001".to_owned();
    form.signature_name = "Tan Wei".to_owned();
    assert!(!form.can_submit());

    let outcome = form.submit(&client).await.clone();
    assert!(!outcome.is_success());
    assert!(direct.envelopes().await.is_empty());

    form.signature
        .draw_stroke([SignaturePoint::new(10.0, 10.0), SignaturePoint::new(60.0, 40.0)]);
    form.signature_name.clear();
    assert!(!form.can_submit());

    form.signature_name = "Tan Wei".to_owned();
    assert!(form.can_submit());

    form.signature.clear();
    assert!(!form.can_submit());
}

#[tokio::test]
async fn acknowledge_sends_signature_as_data_url() {
    let direct = RecordingSubmitter::accepting();
    let proxied = RecordingSubmitter::new(DeliveryMode::AwaitResponse, json!({}));
    let client = split_client(direct.clone(), proxied);

    let mut form = AcknowledgeForm::new();
    form.request_id = "PPE-2025-0001".to_owned();
    form.signature_name = "Tan Wei".to_owned();
    form.ack_date = NaiveDate::from_ymd_opt(2025, 3, 5);
    form.signature
        .draw_stroke([SignaturePoint::new(10.0, 10.0), SignaturePoint::new(60.0, 40.0)]);

    let outcome = form.submit(&client).await.clone();

    assert!(outcome.is_success());
    let envelopes = direct.envelopes().await;
    let payload = &envelopes[0]["payload"];
    assert_eq!(envelopes[0]["action"], json!("acknowledgeReceipt"));
    assert_eq!(payload["requestId"], json!("PPE-2025-0001"));
    assert_eq!(payload["signatureName"], json!("Tan Wei"));
    assert_eq!(payload["ackDate"], json!("2025-03-05T00:00:00.000Z"));
    assert!(
        payload["signatureDataUrl"]
            .as_str()
            .is_some_and(|url| url.starts_with("data:image/svg+xml;base64,"))
    );
}

#[test]
fn outcome_from_failed_reply_without_error_text() {
    let outcome = FormOutcome::from_reply(&ppe_portal_domain::BackendReply::default());
    assert_eq!(outcome, FormOutcome::failed("Unknown error"));
}
