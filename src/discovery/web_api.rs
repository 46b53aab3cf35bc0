//! `ISteamUser/GetPlayerSummaries` client.

use async_trait::async_trait;
use serde::Deserialize;

use super::{PlayerLookup, SteamId};
use crate::error::LookupError;
use crate::http::retry_after_secs;

const PLAYER_SUMMARIES_PATH: &str = "/ISteamUser/GetPlayerSummaries/v0002/";

#[derive(Debug, Default, Deserialize)]
struct SummariesEnvelope {
    #[serde(default)]
    response: SummariesBody,
}

#[derive(Debug, Default, Deserialize)]
struct SummariesBody {
    #[serde(default)]
    players: Vec<PlayerSummary>,
}

/// Only the full-size avatar is consumed; other profile fields are ignored.
#[derive(Debug, Deserialize)]
struct PlayerSummary {
    #[serde(default)]
    avatarfull: Option<String>,
}

/// Player lookup backed by the public Steam Web API.
pub struct SteamWebApi {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl SteamWebApi {
    pub fn new(http: reqwest::Client, base_url: &str, api_key: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }
}

#[async_trait]
impl PlayerLookup for SteamWebApi {
    async fn avatar_for(&self, id: SteamId) -> Result<Option<String>, LookupError> {
        let steam_id = id.to_string();
        // The request URL embeds the API key; strip it from transport errors
        // so it never reaches the logs.
        let response = self
            .http
            .get(format!("{}{PLAYER_SUMMARIES_PATH}", self.base_url))
            .query(&[("key", self.api_key.as_str()), ("steamids", steam_id.as_str())])
            .send()
            .await
            .map_err(|e| LookupError::Http(e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status {
                code: status.as_u16(),
                retry_after_secs: retry_after_secs(response.headers()),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| LookupError::Http(e.without_url()))?;
        let envelope: SummariesEnvelope = serde_json::from_str(&body)
            .map_err(|e| LookupError::InvalidResponse(e.to_string()))?;
        Ok(envelope
            .response
            .players
            .into_iter()
            .next()
            .and_then(|player| player.avatarfull)
            .filter(|avatar| !avatar.trim().is_empty()))
    }
}
