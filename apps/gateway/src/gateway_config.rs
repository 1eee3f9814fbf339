use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use ppe_portal_core::AppError;
use tracing_subscriber::EnvFilter;
use url::Url;

/// Runtime settings for the gateway binary.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub backend_url: Url,
    pub gateway_host: String,
    pub gateway_port: u16,
    pub frontend_url: Option<String>,
}

impl GatewayConfig {
    pub fn load() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from any variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let backend_url = non_empty(&lookup, "PPE_BACKEND_URL")
            .or_else(|| non_empty(&lookup, "APPS_SCRIPT_URL"))
            .ok_or_else(|| AppError::Validation("PPE_BACKEND_URL is required".to_owned()))?;
        let backend_url = Url::parse(backend_url.trim()).map_err(|error| {
            AppError::Validation(format!("invalid PPE_BACKEND_URL '{backend_url}': {error}"))
        })?;

        let gateway_host =
            non_empty(&lookup, "GATEWAY_HOST").unwrap_or_else(|| "127.0.0.1".to_owned());
        let gateway_port = lookup("GATEWAY_PORT")
            .and_then(|value| value.trim().parse::<u16>().ok())
            .unwrap_or(3001);
        let frontend_url = non_empty(&lookup, "FRONTEND_URL");

        Ok(Self {
            backend_url,
            gateway_host,
            gateway_port,
            frontend_url,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.gateway_host).map_err(|error| {
            AppError::Internal(format!(
                "invalid GATEWAY_HOST '{}': {error}",
                self.gateway_host
            ))
        })?;
        Ok(SocketAddr::from((host, self.gateway_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn non_empty(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    lookup(name).filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use ppe_portal_core::AppError;

    use super::GatewayConfig;

    fn config_from(pairs: &[(&str, &str)]) -> Result<GatewayConfig, AppError> {
        let variables: HashMap<String, String> = pairs
            .iter()
            .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
            .collect();
        GatewayConfig::from_lookup(|name| variables.get(name).cloned())
    }

    #[test]
    fn backend_url_is_required() {
        let config = config_from(&[("GATEWAY_PORT", "4000")]);
        assert!(matches!(config, Err(AppError::Validation(_))));
    }

    #[test]
    fn defaults_apply_when_only_backend_is_set() {
        let config = config_from(&[(
            "PPE_BACKEND_URL",
            "https://script.example.com/macros/s/abc/exec",
        )]);
        assert!(config.is_ok());
        let config = config.unwrap_or_else(|_| unreachable!());

        assert_eq!(config.gateway_host, "127.0.0.1");
        assert_eq!(config.gateway_port, 3001);
        assert!(config.frontend_url.is_none());
        assert_eq!(
            config.socket_address().map(|address| address.to_string()).ok(),
            Some("127.0.0.1:3001".to_owned())
        );
    }

    #[test]
    fn apps_script_url_is_accepted_as_fallback() {
        let config = config_from(&[
            ("PPE_BACKEND_URL", "  "),
            ("APPS_SCRIPT_URL", "https://script.example.com/exec"),
        ]);

        assert_eq!(
            config.ok().map(|config| config.backend_url.to_string()),
            Some("https://script.example.com/exec".to_owned())
        );
    }

    #[test]
    fn malformed_backend_url_is_rejected() {
        let config = config_from(&[("PPE_BACKEND_URL", "not a url")]);
        assert!(matches!(config, Err(AppError::Validation(_))));
    }

    #[test]
    fn invalid_host_fails_socket_address() {
        let config = config_from(&[
            ("PPE_BACKEND_URL", "https://script.example.com/exec"),
            ("GATEWAY_HOST", "localhost"),
            ("GATEWAY_PORT", "8080"),
            ("FRONTEND_URL", "http://localhost:5173"),
        ]);
        assert!(config.is_ok());
        let config = config.unwrap_or_else(|_| unreachable!());

        assert_eq!(config.gateway_port, 8080);
        assert_eq!(config.frontend_url.as_deref(), Some("http://localhost:5173"));
        assert!(config.socket_address().is_err());
    }
}
