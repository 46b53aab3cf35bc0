//! Compile-time build metadata for the CLI version surface.

/// Semver package version from `Cargo.toml`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Commit hash captured by `build.rs`.
pub const GIT_COMMIT: &str = env!("STEAM_UWU_BUILD_GIT_HASH");

/// Build timestamp captured by `build.rs`.
pub const BUILD_TIMESTAMP: &str = env!("STEAM_UWU_BUILD_TIMESTAMP");

/// Multi-line block printed by `steam-uwu --version`.
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\ncommit: ",
    env!("STEAM_UWU_BUILD_GIT_HASH"),
    "\nbuilt: ",
    env!("STEAM_UWU_BUILD_TIMESTAMP")
);

/// One-line form used in debug logs at startup.
pub fn version_line() -> String {
    format!("steam-uwu {VERSION} ({GIT_COMMIT}, built {BUILD_TIMESTAMP})")
}
