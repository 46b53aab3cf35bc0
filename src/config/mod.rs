//! Configuration resolved from environment variables.
//!
//! There is no config file. Every value comes from the process environment
//! (through an injectable lookup) or the built-in defaults, and the result is
//! passed explicitly to each component.

use crate::error::ConfigError;

mod defaults;
mod env;
mod types;

pub use defaults::{
    DEFAULT_COMMUNITY_BASE_URL, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_INITIAL_BACKOFF_MS,
    DEFAULT_MAX_ATTEMPTS, DEFAULT_MAX_BACKOFF_MS, DEFAULT_WEB_API_BASE_URL,
};
pub use env::{
    API_KEY_VAR, HTTP_TIMEOUT_VAR, LOG_FILTER_VAR, PASSWORD_VAR, SHARED_SECRET_VAR, USERNAME_VAR,
};
pub use types::{Config, Credentials, NetworkConfig, SteamEndpoints};

/// Load configuration from the process environment.
///
/// In preview mode the account credentials are optional.
pub fn load_config(preview: bool) -> Result<Config, ConfigError> {
    load_config_with(|name| std::env::var(name).ok(), preview)
}

/// Load configuration through `env_lookup`.
///
/// The API key is checked first so a missing key is always the reported
/// error, whatever else is absent.
pub fn load_config_with<FEnv>(env_lookup: FEnv, preview: bool) -> Result<Config, ConfigError>
where
    FEnv: Fn(&str) -> Option<String>,
{
    let api_key = env::required(&env_lookup, API_KEY_VAR)?;
    let credentials = resolve_credentials(&env_lookup, preview)?;

    let mut config = Config::new(api_key);
    config.credentials = credentials;
    if let Some(secs) = env::http_timeout_override(&env_lookup)? {
        config.network.http_timeout_secs = secs;
    }
    Ok(config)
}

fn resolve_credentials<FEnv>(env_lookup: &FEnv, preview: bool) -> Result<Option<Credentials>, ConfigError>
where
    FEnv: Fn(&str) -> Option<String>,
{
    let account_name = env::non_blank(env_lookup, USERNAME_VAR);
    let password = env::non_blank(env_lookup, PASSWORD_VAR);
    match (account_name, password) {
        (Some(account_name), Some(password)) => Ok(Some(Credentials {
            account_name,
            password,
            shared_secret: env::non_blank(env_lookup, SHARED_SECRET_VAR),
        })),
        _ if preview => Ok(None),
        (None, _) => Err(ConfigError::Missing(USERNAME_VAR)),
        (Some(_), None) => Err(ConfigError::Missing(PASSWORD_VAR)),
    }
}
