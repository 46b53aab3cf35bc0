//! Random profile discovery.
//!
//! Probes random account ids against the player-summary API until one
//! resolves to a profile with an avatar, or the retry budget runs out.

use std::fmt;

use async_trait::async_trait;
use rand::Rng;
use tokio::time::sleep;

use crate::error::{DiscoveryError, LookupError};

mod retry;
mod web_api;

pub use retry::RetryPolicy;
pub use web_api::SteamWebApi;

/// Fixed leading digits shared by individual-account 64-bit ids.
pub const STEAM_ID_PREFIX: &str = "7656119";
/// Number of random decimal digits after the prefix.
pub const SUFFIX_DIGITS: usize = 10;

const PREFIX_VALUE: u64 = 76_561_190_000_000_000;
const SUFFIX_SPACE: u64 = 10_000_000_000;

/// Candidate 64-bit account id: prefix plus a zero-padded 10-digit suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SteamId(u64);

impl SteamId {
    /// Id for `suffix`, or `None` if it needs more than ten digits.
    pub fn from_suffix(suffix: u64) -> Option<Self> {
        (suffix < SUFFIX_SPACE).then(|| Self(PREFIX_VALUE + suffix))
    }

    /// Uniformly random suffix in `0..10^10`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(PREFIX_VALUE + rng.gen_range(0..SUFFIX_SPACE))
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }

    pub fn suffix(self) -> u64 {
        self.0 - PREFIX_VALUE
    }
}

impl fmt::Display for SteamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{STEAM_ID_PREFIX}{:0width$}", self.suffix(), width = SUFFIX_DIGITS)
    }
}

/// Player-summary lookup used by the discovery loop.
///
/// Tests substitute a scripted double; production uses [`SteamWebApi`].
#[async_trait]
pub trait PlayerLookup: Send + Sync {
    /// Avatar URL of `id`'s profile; `Ok(None)` when there is no such
    /// profile or it has no avatar.
    async fn avatar_for(&self, id: SteamId) -> Result<Option<String>, LookupError>;
}

/// Probe random ids until one has an avatar.
///
/// Per-attempt failures are logged at debug level and retried after the
/// policy's backoff; only exhaustion of the budget is reported.
pub async fn discover_avatar<L, R>(
    lookup: &L,
    rng: &mut R,
    policy: &RetryPolicy,
) -> Result<String, DiscoveryError>
where
    L: PlayerLookup + ?Sized,
    R: Rng + Send + ?Sized,
{
    let max_attempts = policy.max_attempts.max(1);
    for attempt in 0..max_attempts {
        let id = SteamId::random(rng);
        let failure = match lookup.avatar_for(id).await {
            Ok(Some(avatar)) => {
                tracing::info!(steam_id = %id, attempts = attempt + 1, "found profile avatar");
                return Ok(avatar);
            }
            Ok(None) => {
                tracing::debug!(steam_id = %id, attempt, "no profile avatar");
                None
            }
            Err(err) => {
                tracing::debug!(steam_id = %id, attempt, error = %err, "lookup failed");
                Some(err)
            }
        };
        if policy.exhausted(attempt) {
            break;
        }
        sleep(policy.delay_for(attempt, failure.as_ref())).await;
    }
    tracing::warn!(attempts = max_attempts, "discovery budget exhausted");
    Err(DiscoveryError::NotFound {
        attempts: max_attempts,
    })
}
