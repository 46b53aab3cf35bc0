//! Built-in defaults for values the environment may leave unset.

/// Steam Web API host serving `ISteamUser` and `IAuthenticationService`.
pub const DEFAULT_WEB_API_BASE_URL: &str = "https://api.steampowered.com";
/// Community site host serving profile edit pages.
pub const DEFAULT_COMMUNITY_BASE_URL: &str = "https://steamcommunity.com";
/// Per-request HTTP timeout.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 15;
/// Discovery attempt cap when `--max-attempts` is not given.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 100;
/// First backoff delay between discovery attempts.
pub const DEFAULT_INITIAL_BACKOFF_MS: u64 = 50;
/// Ceiling for the discovery backoff delay.
pub const DEFAULT_MAX_BACKOFF_MS: u64 = 1_000;
