//! Environment variable names and lookup helpers.

use crate::error::ConfigError;

pub const API_KEY_VAR: &str = "STEAM_API_KEY";
pub const USERNAME_VAR: &str = "STEAM_USERNAME";
pub const PASSWORD_VAR: &str = "STEAM_PASSWORD";
pub const SHARED_SECRET_VAR: &str = "STEAM_SHARED_SECRET";
pub const HTTP_TIMEOUT_VAR: &str = "STEAM_HTTP_TIMEOUT_SECS";
/// `tracing` filter directive for stderr logs.
pub const LOG_FILTER_VAR: &str = "STEAM_UWU_LOG";

/// Non-blank value of `name`, trimmed.
pub(super) fn non_blank<FEnv>(env_lookup: &FEnv, name: &str) -> Option<String>
where
    FEnv: Fn(&str) -> Option<String>,
{
    env_lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub(super) fn required<FEnv>(env_lookup: &FEnv, name: &'static str) -> Result<String, ConfigError>
where
    FEnv: Fn(&str) -> Option<String>,
{
    non_blank(env_lookup, name).ok_or(ConfigError::Missing(name))
}

/// Parse `STEAM_HTTP_TIMEOUT_SECS` if set.
pub(super) fn http_timeout_override<FEnv>(env_lookup: &FEnv) -> Result<Option<u64>, ConfigError>
where
    FEnv: Fn(&str) -> Option<String>,
{
    let Some(raw) = non_blank(env_lookup, HTTP_TIMEOUT_VAR) else {
        return Ok(None);
    };
    // Clamp to at least 1 second so zero never means "no timeout".
    let secs = raw.parse::<u64>().map_err(|_| {
        ConfigError::Invalid(format!(
            "invalid {HTTP_TIMEOUT_VAR} value `{raw}`: expected positive integer seconds"
        ))
    })?;
    Ok(Some(secs.max(1)))
}
