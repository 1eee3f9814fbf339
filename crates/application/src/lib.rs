//! Application services and ports.

#![forbid(unsafe_code)]

mod forms;
mod navigation;
mod relay_ports;
mod relay_service;
mod request_client;
#[cfg(test)]
mod test_support;

pub use forms::{
    AcknowledgeForm, FormOutcome, IssuanceDraftLine, NewRequestForm, StoremanIssuanceForm,
};
pub use navigation::NavigationShell;
pub use relay_ports::{BackendRelay, EnvelopeSubmitter};
pub use relay_service::RelayService;
pub use request_client::{PpeRequestClient, RoutingPolicy};
