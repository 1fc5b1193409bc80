// Service configuration read from the environment

use std::env;
use std::str::FromStr;

use crate::utils::error::Error;
use crate::utils::merge::JoinStrategy;

/// Connection settings for the OCM hub
#[derive(Debug, Clone, PartialEq)]
pub struct HubConfig {
    /// The name the hub cluster goes by locally
    pub name: String,
    /// API server URL; `None` falls back to kubeconfig or in-cluster inference
    pub url: Option<String>,
    pub service_account_token: Option<String>,
    pub skip_tls_verify: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub hub: HubConfig,
    pub join_strategy: JoinStrategy,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, Error> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup, so it can be loaded without
    /// touching the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_or("PORT", lookup("PORT"), 7007)?;

        let name = lookup("OCM_HUB_NAME")
            .filter(|name| !name.is_empty())
            .ok_or_else(|| Error::ConfigError("OCM_HUB_NAME is not set".to_string()))?;

        let url = lookup("OCM_HUB_URL").filter(|url| !url.is_empty());
        if let Some(url) = &url {
            url.parse::<http::Uri>()
                .map_err(|err| Error::ConfigError(format!("OCM_HUB_URL {}: {}", url, err)))?;
        }

        let hub = HubConfig {
            name,
            url,
            service_account_token: lookup("OCM_HUB_SERVICE_ACCOUNT_TOKEN")
                .filter(|token| !token.is_empty()),
            skip_tls_verify: parse_or(
                "OCM_HUB_SKIP_TLS_VERIFY",
                lookup("OCM_HUB_SKIP_TLS_VERIFY"),
                false,
            )?,
        };

        let join_strategy = parse_or(
            "OCM_STATUS_JOIN",
            lookup("OCM_STATUS_JOIN"),
            JoinStrategy::default(),
        )?;

        Ok(ServerConfig {
            host,
            port,
            hub,
            join_strategy,
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T>(key: &str, value: Option<String>, default: T) -> Result<T, Error>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|err| Error::ConfigError(format!("{} {:?}: {}", key, raw, err))),
    }
}
