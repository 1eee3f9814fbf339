use async_trait::async_trait;
use ppe_portal_application::BackendRelay;
use ppe_portal_core::{AppError, AppResult};
use reqwest::header::CONTENT_TYPE;
use url::Url;

use crate::ENVELOPE_CONTENT_TYPE;

/// Gateway-side relay posting envelopes to the backend script over HTTP.
#[derive(Clone)]
pub struct HttpBackendRelay {
    http_client: reqwest::Client,
    backend_url: Url,
}

impl HttpBackendRelay {
    /// Creates a relay for one backend URL.
    #[must_use]
    pub fn new(http_client: reqwest::Client, backend_url: Url) -> Self {
        Self {
            http_client,
            backend_url,
        }
    }
}

#[async_trait]
impl BackendRelay for HttpBackendRelay {
    async fn post_envelope(&self, body: String) -> AppResult<String> {
        let response = self
            .http_client
            .post(self.backend_url.clone())
            .header(CONTENT_TYPE, ENVELOPE_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .map_err(|error| AppError::Transport(error.to_string()))?;

        response
            .text()
            .await
            .map_err(|error| AppError::Transport(format!("failed to read backend reply: {error}")))
    }
}
