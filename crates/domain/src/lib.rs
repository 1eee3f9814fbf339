//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod acknowledgement;
mod envelope;
mod issuance;
mod item;
mod reply;
mod request;
mod signature;
mod timestamp;
mod view;

pub use acknowledgement::AcknowledgementRecord;
pub use envelope::{Action, ActionEnvelope, DeliveryMode};
pub use issuance::{IssuanceLine, RequestItem, RequestItemsReply, RowRef, StoremanIssuePayload};
pub use item::{
    COMMON_PPE_ITEMS, ItemRowInput, PpeItemLine, coerce_issued_quantity, normalize_item_rows,
    parse_positive_quantity,
};
pub use reply::BackendReply;
pub use request::{NewRequestPayload, RequestorDetails, SafetyApproval, SafetyDecision};
pub use signature::{SIGNATURE_CANVAS_HEIGHT, SIGNATURE_CANVAS_WIDTH, SignaturePad, SignaturePoint};
pub use timestamp::{iso_timestamp, iso_timestamp_for_date, parse_form_date};
pub use view::View;
