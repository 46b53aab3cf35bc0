//! Unified error types for discovery, phrase generation and publishing.

use std::fmt;

use crate::publish::PublishStage;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Errors when reading configuration from the environment.
#[derive(Debug)]
pub enum ConfigError {
    /// A required environment variable is unset or blank.
    Missing(&'static str),
    /// A value is present but unusable.
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing(var) => write!(f, "missing {var} environment variable"),
            Self::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// LookupError
// ---------------------------------------------------------------------------

/// Failure of a single player-summary lookup.
#[derive(Debug)]
pub enum LookupError {
    /// Network / reqwest-level error, including timeouts.
    Http(reqwest::Error),
    /// Non-2xx status from the Web API.
    Status {
        code: u16,
        retry_after_secs: Option<u64>,
    },
    /// Body was not the expected JSON shape.
    InvalidResponse(String),
}

impl LookupError {
    /// Server-requested delay before the next attempt, if any.
    pub fn retry_after_secs(&self) -> Option<u64> {
        match self {
            Self::Status {
                retry_after_secs, ..
            } => *retry_after_secs,
            _ => None,
        }
    }
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(e) => write!(f, "http: {e}"),
            Self::Status { code, .. } => write!(f, "status {code}"),
            Self::InvalidResponse(msg) => write!(f, "invalid response: {msg}"),
        }
    }
}

impl std::error::Error for LookupError {}

impl From<reqwest::Error> for LookupError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e)
    }
}

// ---------------------------------------------------------------------------
// DiscoveryError
// ---------------------------------------------------------------------------

/// The discovery loop ran out of attempts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscoveryError {
    NotFound { attempts: u32 },
}

impl fmt::Display for DiscoveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { attempts } => {
                write!(f, "no profile with an avatar found after {attempts} attempts")
            }
        }
    }
}

impl std::error::Error for DiscoveryError {}

// ---------------------------------------------------------------------------
// PhraseError
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhraseError {
    /// Named clause list has no entries to choose from.
    EmptyClauseList(&'static str),
}

impl fmt::Display for PhraseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyClauseList(name) => write!(f, "{name} clause list is empty"),
        }
    }
}

impl std::error::Error for PhraseError {}

// ---------------------------------------------------------------------------
// SessionError
// ---------------------------------------------------------------------------

/// Errors raised by a Steam account session (login, cookies, profile edit).
#[derive(Debug)]
pub enum SessionError {
    Http(reqwest::Error),
    Status(u16, String),
    /// Steam refused the credentials; carries the reported result code.
    LoginRejected(String),
    /// The account needs a Steam Guard code we cannot provide.
    SteamGuardRequired(String),
    /// Password encryption or one-time code derivation failed.
    Crypto(String),
    InvalidResponse(String),
    /// A session step was invoked out of order.
    NotLoggedOn,
    /// The community site answered the edit but did not apply it.
    EditRejected(String),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(e) => write!(f, "http: {e}"),
            Self::Status(code, body) => write!(f, "status {code}: {body}"),
            Self::LoginRejected(reason) => write!(f, "login rejected: {reason}"),
            Self::SteamGuardRequired(msg) => write!(f, "steam guard required: {msg}"),
            Self::Crypto(msg) => write!(f, "crypto: {msg}"),
            Self::InvalidResponse(msg) => write!(f, "invalid response: {msg}"),
            Self::NotLoggedOn => write!(f, "not logged on"),
            Self::EditRejected(msg) => write!(f, "profile edit rejected: {msg}"),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<reqwest::Error> for SessionError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e)
    }
}

// ---------------------------------------------------------------------------
// PublishError
// ---------------------------------------------------------------------------

/// A publish attempt failed; `stage` is the last state reached.
#[derive(Debug)]
pub struct PublishError {
    pub stage: PublishStage,
    pub source: SessionError,
}

impl fmt::Display for PublishError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let step = match self.stage {
            PublishStage::Unauthenticated => "log on",
            PublishStage::LoggedOn => "establish web session",
            PublishStage::SessionEstablished => "edit profile",
            PublishStage::Published => "finish publish",
        };
        write!(f, "failed to {step}: {}", self.source)
    }
}

impl std::error::Error for PublishError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

// ---------------------------------------------------------------------------
// AppError: top-level
// ---------------------------------------------------------------------------

/// Top-level error for one run.
#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Discovery(DiscoveryError),
    Phrase(PhraseError),
    Publish(PublishError),
    /// Writing the result to stdout failed.
    Output(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "{e}"),
            Self::Discovery(e) => write!(f, "discovery: {e}"),
            Self::Phrase(e) => write!(f, "phrase: {e}"),
            Self::Publish(e) => write!(f, "publish: {e}"),
            Self::Output(msg) => write!(f, "output: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<DiscoveryError> for AppError {
    fn from(e: DiscoveryError) -> Self {
        Self::Discovery(e)
    }
}

impl From<PhraseError> for AppError {
    fn from(e: PhraseError) -> Self {
        Self::Phrase(e)
    }
}

impl From<PublishError> for AppError {
    fn from(e: PublishError) -> Self {
        Self::Publish(e)
    }
}
