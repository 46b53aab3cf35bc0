//! [`SteamAccount`] backed by the Steam web endpoints.

use async_trait::async_trait;
use rand::RngCore;

use super::auth::{self, AuthTokens};
use super::community;
use super::{LogOnDetails, SteamAccount, WebSession};
use crate::config::SteamEndpoints;
use crate::error::SessionError;

const SESSION_ID_BYTES: usize = 12;

enum AccountState {
    Offline,
    LoggedOn(AuthTokens),
    Web(WebSession),
}

/// Steam account driven over HTTPS.
pub struct SteamWebAccount {
    http: reqwest::Client,
    endpoints: SteamEndpoints,
    device_name: String,
    state: AccountState,
}

impl SteamWebAccount {
    pub fn new(http: reqwest::Client, endpoints: SteamEndpoints) -> Self {
        Self {
            http,
            endpoints,
            device_name: device_friendly_name(),
            state: AccountState::Offline,
        }
    }
}

#[async_trait]
impl SteamAccount for SteamWebAccount {
    async fn log_on(&mut self, details: &LogOnDetails) -> Result<(), SessionError> {
        let tokens = auth::authenticate(
            &self.http,
            &self.endpoints.web_api,
            details,
            &self.device_name,
        )
        .await?;
        tracing::info!(steam_id = %tokens.steam_id, "logged on");
        self.state = AccountState::LoggedOn(tokens);
        Ok(())
    }

    async fn web_log_on(&mut self) -> Result<WebSession, SessionError> {
        let session = match &self.state {
            AccountState::LoggedOn(tokens) => {
                WebSession::new(&tokens.steam_id, &new_session_id(), &tokens.access_token)
            }
            AccountState::Web(session) => return Ok(session.clone()),
            AccountState::Offline => return Err(SessionError::NotLoggedOn),
        };
        tracing::debug!(steam_id = %session.steam_id, "web session established");
        self.state = AccountState::Web(session.clone());
        Ok(session)
    }

    async fn edit_profile(
        &mut self,
        session: &WebSession,
        summary: &str,
    ) -> Result<(), SessionError> {
        if matches!(self.state, AccountState::Offline) {
            return Err(SessionError::NotLoggedOn);
        }
        community::edit_profile(&self.http, &self.endpoints.community, session, summary).await?;
        tracing::info!(steam_id = %session.steam_id, "profile summary updated");
        Ok(())
    }

    async fn log_off(&mut self) {
        match std::mem::replace(&mut self.state, AccountState::Offline) {
            AccountState::Web(session) => {
                if let Err(err) =
                    community::log_out(&self.http, &self.endpoints.community, &session).await
                {
                    tracing::warn!(error = %err, "web logout failed");
                }
            }
            // Ephemeral auth sessions expire on their own.
            AccountState::LoggedOn(_) | AccountState::Offline => {}
        }
        tracing::debug!("logged off");
    }
}

/// Random hex CSRF token for the `sessionid` cookie.
fn new_session_id() -> String {
    let mut bytes = [0u8; SESSION_ID_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn device_friendly_name() -> String {
    let host = hostname::get()
        .map(|value| value.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown-host".to_string());
    format!("steam-uwu on {host}")
}
