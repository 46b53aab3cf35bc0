//! Writing the generated phrase to a Steam profile.
//!
//! A publish walks `Unauthenticated -> LoggedOn -> SessionEstablished ->
//! Published`. Whatever state a failure leaves it in, the account is logged
//! off before the result is returned.

use async_trait::async_trait;

use crate::config::{Credentials, SteamEndpoints};
use crate::error::{PublishError, SessionError};
use crate::steam::{LogOnDetails, SteamAccount, SteamWebAccount};

/// Progress of one publish attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishStage {
    Unauthenticated,
    LoggedOn,
    SessionEstablished,
    Published,
}

/// Sink for the generated description.
///
/// The orchestrator only sees this trait, so tests can record whether a
/// publish happened without any network access.
#[async_trait]
pub trait ProfilePublisher: Send {
    async fn publish(&mut self, description: &str) -> Result<(), PublishError>;
}

/// Drive `account` through a full publish of `summary`, then log off.
pub async fn publish_summary<A>(
    account: &mut A,
    details: &LogOnDetails,
    summary: &str,
) -> Result<(), PublishError>
where
    A: SteamAccount + ?Sized,
{
    let mut stage = PublishStage::Unauthenticated;
    let outcome = advance(account, details, summary, &mut stage).await;
    account.log_off().await;
    match outcome {
        Ok(()) => {
            tracing::info!("profile description published");
            Ok(())
        }
        Err(source) => {
            tracing::debug!(?stage, error = %source, "publish failed");
            Err(PublishError { stage, source })
        }
    }
}

async fn advance<A>(
    account: &mut A,
    details: &LogOnDetails,
    summary: &str,
    stage: &mut PublishStage,
) -> Result<(), SessionError>
where
    A: SteamAccount + ?Sized,
{
    account.log_on(details).await?;
    *stage = PublishStage::LoggedOn;
    let session = account.web_log_on().await?;
    *stage = PublishStage::SessionEstablished;
    account.edit_profile(&session, summary).await?;
    *stage = PublishStage::Published;
    Ok(())
}

/// Production publisher: one fresh [`SteamWebAccount`] per publish.
pub struct SessionPublisher {
    http: reqwest::Client,
    endpoints: SteamEndpoints,
    credentials: Credentials,
}

impl SessionPublisher {
    pub fn new(http: reqwest::Client, endpoints: SteamEndpoints, credentials: Credentials) -> Self {
        Self {
            http,
            endpoints,
            credentials,
        }
    }
}

#[async_trait]
impl ProfilePublisher for SessionPublisher {
    async fn publish(&mut self, description: &str) -> Result<(), PublishError> {
        let details =
            LogOnDetails::from_credentials(&self.credentials).map_err(|source| PublishError {
                stage: PublishStage::Unauthenticated,
                source,
            })?;
        let mut account = SteamWebAccount::new(self.http.clone(), self.endpoints.clone());
        publish_summary(&mut account, &details, description).await
    }
}
