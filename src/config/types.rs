//! Configuration data model.

use std::fmt;
use std::time::Duration;

use super::defaults::{
    DEFAULT_COMMUNITY_BASE_URL, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_WEB_API_BASE_URL,
};
use crate::discovery::RetryPolicy;

/// Fully resolved runtime configuration for one run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Steam Web API key used for player lookups.
    pub api_key: String,
    /// Account credentials; `None` only in preview mode.
    pub credentials: Option<Credentials>,
    pub endpoints: SteamEndpoints,
    pub network: NetworkConfig,
    pub discovery: RetryPolicy,
}

impl Config {
    /// Config with defaults for everything except the API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            credentials: None,
            endpoints: SteamEndpoints::default(),
            network: NetworkConfig::default(),
            discovery: RetryPolicy::default(),
        }
    }
}

/// Steam login material.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub account_name: String,
    pub password: String,
    /// Base64 Steam Guard shared secret for mobile codes.
    pub shared_secret: Option<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("account_name", &self.account_name)
            .field("password", &"<redacted>")
            .field(
                "shared_secret",
                &self.shared_secret.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

/// Base URLs for the two Steam hosts we talk to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SteamEndpoints {
    pub web_api: String,
    pub community: String,
}

impl Default for SteamEndpoints {
    fn default() -> Self {
        Self {
            web_api: DEFAULT_WEB_API_BASE_URL.to_string(),
            community: DEFAULT_COMMUNITY_BASE_URL.to_string(),
        }
    }
}

impl SteamEndpoints {
    /// Point both hosts at one base URL (local test servers).
    pub fn single_host(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/').to_string();
        Self {
            web_api: base.clone(),
            community: base,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    pub http_timeout_secs: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}

impl NetworkConfig {
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}
