//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod http_backend_relay;
mod http_envelope_submitters;

pub use http_backend_relay::HttpBackendRelay;
pub use http_envelope_submitters::{DirectEnvelopeSubmitter, ProxiedEnvelopeSubmitter};

/// Content type used for every envelope POST; plain text avoids a CORS preflight.
pub const ENVELOPE_CONTENT_TYPE: &str = "text/plain;charset=utf-8";

#[cfg(test)]
mod test_backend;
