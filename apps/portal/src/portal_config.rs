use std::env;
use std::str::FromStr;

use ppe_portal_application::RoutingPolicy;
use ppe_portal_core::AppError;
use tracing_subscriber::EnvFilter;
use url::Url;

const DEFAULT_GATEWAY_URL: &str = "http://127.0.0.1:3001/api/ppe";

/// Runtime settings for the terminal portal.
#[derive(Debug, Clone)]
pub struct PortalConfig {
    pub backend_url: Url,
    pub gateway_url: Url,
    pub routing: RoutingPolicy,
}

impl PortalConfig {
    pub fn load() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from any variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let backend_url = lookup("PPE_BACKEND_URL")
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| AppError::Validation("PPE_BACKEND_URL is required".to_owned()))?;
        let backend_url = parse_url("PPE_BACKEND_URL", &backend_url)?;

        let gateway_url = lookup("PPE_GATEWAY_URL")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_GATEWAY_URL.to_owned());
        let gateway_url = parse_url("PPE_GATEWAY_URL", &gateway_url)?;

        let routing = lookup("PPE_ROUTING")
            .filter(|value| !value.trim().is_empty())
            .map(|value| RoutingPolicy::from_str(&value))
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            backend_url,
            gateway_url,
            routing,
        })
    }
}

/// Installs the log subscriber on stderr so records never mix with prompts.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn parse_url(name: &str, value: &str) -> Result<Url, AppError> {
    Url::parse(value.trim())
        .map_err(|error| AppError::Validation(format!("invalid {name} '{value}': {error}")))
}
