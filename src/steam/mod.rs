//! Steam account session: login, web cookies and profile edits.
//!
//! The layout mirrors the order a publish goes through:
//! - `auth`: credential login through `IAuthenticationService`.
//! - `community`: profile edit page and logout on the community site.
//! - `totp`: Steam Guard mobile codes from a shared secret.
//! - `account`: [`SteamWebAccount`], the [`SteamAccount`] tying them together.

use std::fmt;

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::Credentials;
use crate::error::SessionError;

mod account;
mod auth;
mod community;
pub mod totp;

pub use account::SteamWebAccount;

/// What `log_on` needs to authenticate one account.
#[derive(Clone, PartialEq, Eq)]
pub struct LogOnDetails {
    pub account_name: String,
    pub password: String,
    /// Steam Guard mobile code, when a shared secret is configured.
    pub two_factor_code: Option<String>,
}

impl LogOnDetails {
    /// Details for `credentials`, deriving the current Steam Guard code.
    pub fn from_credentials(credentials: &Credentials) -> Result<Self, SessionError> {
        let two_factor_code = credentials
            .shared_secret
            .as_deref()
            .map(totp::generate_auth_code)
            .transpose()?;
        Ok(Self {
            account_name: credentials.account_name.clone(),
            password: credentials.password.clone(),
            two_factor_code,
        })
    }
}

impl fmt::Debug for LogOnDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogOnDetails")
            .field("account_name", &self.account_name)
            .field("password", &"<redacted>")
            .field("two_factor_code", &self.two_factor_code)
            .finish()
    }
}

/// Cookies for an authenticated community web session.
#[derive(Clone, PartialEq, Eq)]
pub struct WebSession {
    pub steam_id: String,
    /// CSRF token echoed back as `sessionID` on form posts.
    pub session_id: String,
    login_secure: String,
}

impl WebSession {
    pub fn new(steam_id: &str, session_id: &str, access_token: &str) -> Self {
        Self {
            steam_id: steam_id.to_string(),
            session_id: session_id.to_string(),
            login_secure: format!("{steam_id}%7C%7C{access_token}"),
        }
    }

    /// Value for the `Cookie` request header.
    pub fn cookie_header(&self) -> String {
        format!(
            "steamLoginSecure={}; sessionid={}",
            self.login_secure, self.session_id
        )
    }
}

impl fmt::Debug for WebSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebSession")
            .field("steam_id", &self.steam_id)
            .field("session_id", &self.session_id)
            .field("login_secure", &"<redacted>")
            .finish()
    }
}

/// One Steam account, driven through log on, web session, edit, log off.
///
/// Implementations must tolerate `log_off` in any state, including before
/// `log_on` succeeded.
#[async_trait]
pub trait SteamAccount: Send {
    async fn log_on(&mut self, details: &LogOnDetails) -> Result<(), SessionError>;

    async fn web_log_on(&mut self) -> Result<WebSession, SessionError>;

    /// Replace the profile summary, keeping every other profile field.
    async fn edit_profile(&mut self, session: &WebSession, summary: &str)
        -> Result<(), SessionError>;

    async fn log_off(&mut self);
}

/// Steam sends ids, timestamps and location codes either as JSON strings
/// or as numbers; `null` reads as empty.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(text) => Ok(text),
        serde_json::Value::Number(num) => Ok(num.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        _ => Err(serde::de::Error::custom("expected string or number")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_header_joins_steam_id_and_token() {
        let session = WebSession::new("76561198000000001", "abcdef", "tok.en");
        assert_eq!(
            session.cookie_header(),
            "steamLoginSecure=76561198000000001%7C%7Ctok.en; sessionid=abcdef"
        );
        assert!(!format!("{session:?}").contains("tok.en"));
    }

    #[test]
    fn log_on_details_derive_guard_code_from_secret() {
        let mut credentials = Credentials {
            account_name: "gaben".into(),
            password: "hunter2".into(),
            shared_secret: None,
        };
        let details = LogOnDetails::from_credentials(&credentials).expect("details");
        assert_eq!(details.two_factor_code, None);
        assert!(!format!("{details:?}").contains("hunter2"));

        credentials.shared_secret = Some("c3RlYW0tdXd1LXRlc3Qtc2VjcmV0IQ==".into());
        let details = LogOnDetails::from_credentials(&credentials).expect("details");
        assert_eq!(details.two_factor_code.map(|code| code.len()), Some(5));

        credentials.shared_secret = Some("%%%".into());
        assert!(LogOnDetails::from_credentials(&credentials).is_err());
    }

    #[derive(Debug, Deserialize)]
    struct Code {
        #[serde(default, deserialize_with = "string_or_number")]
        value: String,
    }

    #[test]
    fn codes_read_from_strings_numbers_and_null() {
        let read = |json: &str| serde_json::from_str::<Code>(json).map(|code| code.value);
        assert_eq!(read(r#"{"value":"4242"}"#).expect("string"), "4242");
        assert_eq!(read(r#"{"value":3961}"#).expect("number"), "3961");
        assert_eq!(read(r#"{"value":null}"#).expect("null"), "");
        assert_eq!(read("{}").expect("absent"), "");
        assert!(read(r#"{"value":[1]}"#).is_err());
    }
}
