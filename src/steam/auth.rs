//! Credential login through `IAuthenticationService`.
//!
//! The password is RSA-encrypted with a per-account key, an auth session is
//! started, a Steam Guard code is supplied when the account demands one, and
//! the session is polled until Steam issues tokens.

use std::fmt;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine;
use rsa::{BigUint, Pkcs1v15Encrypt, RsaPublicKey};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tokio::time::sleep;

use super::LogOnDetails;
use crate::error::SessionError;

const AUTH_SERVICE_PATH: &str = "/IAuthenticationService";
/// Session audience; tokens are valid for the community site.
const WEBSITE_ID: &str = "Community";
/// `ESessionPersistence_Ephemeral`: nothing outlives this run.
const PERSISTENCE_EPHEMERAL: &str = "0";
/// Upper bound on `PollAuthSessionStatus` calls.
const MAX_POLLS: u32 = 10;
/// Poll interval used when Steam does not suggest one.
const DEFAULT_POLL_INTERVAL_SECS: f64 = 5.0;

const CONFIRMATION_NONE: u32 = 1;
const CONFIRMATION_EMAIL_CODE: u32 = 2;
const CONFIRMATION_DEVICE_CODE: u32 = 3;

/// Tokens issued for a finished auth session.
#[derive(Clone, PartialEq, Eq)]
pub(super) struct AuthTokens {
    pub(super) steam_id: String,
    pub(super) access_token: String,
}

impl fmt::Debug for AuthTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthTokens")
            .field("steam_id", &self.steam_id)
            .field("access_token", &"<redacted>")
            .finish()
    }
}

/// Every service reply wraps its payload in `{"response": {...}}`.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default = "Option::default")]
    response: Option<T>,
}

#[derive(Debug, Deserialize)]
struct RsaKeyResponse {
    #[serde(default)]
    publickey_mod: String,
    #[serde(default)]
    publickey_exp: String,
    #[serde(default, deserialize_with = "super::string_or_number")]
    timestamp: String,
}

#[derive(Debug, Deserialize)]
struct BeginSessionResponse {
    #[serde(default, deserialize_with = "super::string_or_number")]
    client_id: String,
    #[serde(default)]
    request_id: String,
    #[serde(default)]
    interval: Option<f64>,
    #[serde(default)]
    allowed_confirmations: Vec<AllowedConfirmation>,
    #[serde(default, deserialize_with = "super::string_or_number")]
    steamid: String,
    #[serde(default)]
    extended_error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AllowedConfirmation {
    confirmation_type: u32,
}

#[derive(Debug, Deserialize)]
struct PollResponse {
    #[serde(default)]
    access_token: Option<String>,
}

/// Run the full credential login and return the issued tokens.
pub(super) async fn authenticate(
    http: &reqwest::Client,
    web_api_base: &str,
    details: &LogOnDetails,
    device_name: &str,
) -> Result<AuthTokens, SessionError> {
    let key = fetch_rsa_key(http, web_api_base, &details.account_name).await?;
    let encrypted_password = encrypt_password(&key, &details.password)?;

    let form = [
        ("account_name", details.account_name.as_str()),
        ("encrypted_password", encrypted_password.as_str()),
        ("encryption_timestamp", key.timestamp.as_str()),
        ("remember_login", "false"),
        ("persistence", PERSISTENCE_EPHEMERAL),
        ("website_id", WEBSITE_ID),
        ("device_friendly_name", device_name),
    ];
    let response = http
        .post(service_url(web_api_base, "BeginAuthSessionViaCredentials"))
        .form(&form)
        .send()
        .await?;
    let session: BeginSessionResponse = read_envelope(response).await?;
    if session.client_id.is_empty() || session.steamid.is_empty() {
        let reason = session
            .extended_error_message
            .unwrap_or_else(|| "auth session was not started".to_string());
        return Err(SessionError::LoginRejected(reason));
    }
    tracing::debug!(steam_id = %session.steamid, "auth session started");

    if let Some(code) = required_guard_code(&session.allowed_confirmations, details)? {
        let form = [
            ("client_id", session.client_id.as_str()),
            ("steamid", session.steamid.as_str()),
            ("code", code),
            ("code_type", "3"),
        ];
        let response = http
            .post(service_url(web_api_base, "UpdateAuthSessionWithSteamGuardCode"))
            .form(&form)
            .send()
            .await?;
        let _: serde_json::Value = read_envelope(response).await?;
        tracing::debug!("steam guard code accepted");
    }

    poll_for_tokens(http, web_api_base, &session).await
}

async fn fetch_rsa_key(
    http: &reqwest::Client,
    web_api_base: &str,
    account_name: &str,
) -> Result<RsaKeyResponse, SessionError> {
    let response = http
        .get(service_url(web_api_base, "GetPasswordRSAPublicKey"))
        .query(&[("account_name", account_name)])
        .send()
        .await?;
    let key: RsaKeyResponse = read_envelope(response).await?;
    if key.publickey_mod.is_empty() || key.publickey_exp.is_empty() {
        return Err(SessionError::InvalidResponse(
            "RSA key response did not include a public key".to_string(),
        ));
    }
    Ok(key)
}

/// PKCS#1 v1.5 encrypt `password` with the hex modulus/exponent, base64 out.
fn encrypt_password(key: &RsaKeyResponse, password: &str) -> Result<String, SessionError> {
    let modulus = BigUint::parse_bytes(key.publickey_mod.as_bytes(), 16)
        .ok_or_else(|| SessionError::Crypto("RSA modulus is not hex".to_string()))?;
    let exponent = BigUint::parse_bytes(key.publickey_exp.as_bytes(), 16)
        .ok_or_else(|| SessionError::Crypto("RSA exponent is not hex".to_string()))?;
    let public_key = RsaPublicKey::new(modulus, exponent)
        .map_err(|err| SessionError::Crypto(format!("invalid RSA key: {err}")))?;
    let ciphertext = public_key
        .encrypt(&mut rand::thread_rng(), Pkcs1v15Encrypt, password.as_bytes())
        .map_err(|err| SessionError::Crypto(format!("password encryption failed: {err}")))?;
    Ok(B64.encode(ciphertext))
}

/// Steam Guard code to submit, if the session cannot proceed without one.
fn required_guard_code<'a>(
    allowed: &[AllowedConfirmation],
    details: &'a LogOnDetails,
) -> Result<Option<&'a str>, SessionError> {
    if allowed.is_empty()
        || allowed
            .iter()
            .any(|c| c.confirmation_type == CONFIRMATION_NONE)
    {
        return Ok(None);
    }
    if allowed
        .iter()
        .any(|c| c.confirmation_type == CONFIRMATION_DEVICE_CODE)
    {
        return match details.two_factor_code.as_deref() {
            Some(code) => Ok(Some(code)),
            None => Err(SessionError::SteamGuardRequired(
                "account uses the mobile authenticator; set STEAM_SHARED_SECRET".to_string(),
            )),
        };
    }
    if allowed
        .iter()
        .any(|c| c.confirmation_type == CONFIRMATION_EMAIL_CODE)
    {
        return Err(SessionError::SteamGuardRequired(
            "account uses email Steam Guard codes, which are not supported".to_string(),
        ));
    }
    let kinds = allowed
        .iter()
        .map(|c| c.confirmation_type.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    Err(SessionError::SteamGuardRequired(format!(
        "unsupported confirmation types: {kinds}"
    )))
}

async fn poll_for_tokens(
    http: &reqwest::Client,
    web_api_base: &str,
    session: &BeginSessionResponse,
) -> Result<AuthTokens, SessionError> {
    let interval = Duration::from_secs_f64(
        session
            .interval
            .unwrap_or(DEFAULT_POLL_INTERVAL_SECS)
            .clamp(0.0, 30.0),
    );
    let form = [
        ("client_id", session.client_id.as_str()),
        ("request_id", session.request_id.as_str()),
    ];

    for poll in 0..MAX_POLLS {
        let response = http
            .post(service_url(web_api_base, "PollAuthSessionStatus"))
            .form(&form)
            .send()
            .await?;
        let status: PollResponse = read_envelope(response).await?;
        let access_token = status.access_token.unwrap_or_default();
        if !access_token.trim().is_empty() {
            return Ok(AuthTokens {
                steam_id: session.steamid.clone(),
                access_token: access_token.trim().to_string(),
            });
        }
        tracing::debug!(poll, "auth session not confirmed yet");
        if let Some(delay) = delay_after_poll(poll, interval) {
            sleep(delay).await;
        }
    }
    Err(SessionError::LoginRejected(format!(
        "auth session was not confirmed after {MAX_POLLS} polls"
    )))
}

/// Wait before the next poll; `None` once the poll budget is spent.
fn delay_after_poll(poll: u32, interval: Duration) -> Option<Duration> {
    (poll + 1 < MAX_POLLS).then_some(interval)
}

fn service_url(web_api_base: &str, method: &str) -> String {
    format!("{web_api_base}{AUTH_SERVICE_PATH}/{method}/v1/")
}

/// Check transport status and Steam's `x-eresult`, then unwrap `response`.
async fn read_envelope<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, SessionError> {
    let status = response.status();
    let eresult = response
        .headers()
        .get("x-eresult")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u32>().ok());

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(SessionError::Status(status.as_u16(), body));
    }
    if let Some(code) = eresult.filter(|code| *code != 1) {
        return Err(SessionError::LoginRejected(describe_eresult(code)));
    }

    let body = response.text().await?;
    let envelope: Envelope<T> = serde_json::from_str(&body)
        .map_err(|err| SessionError::InvalidResponse(err.to_string()))?;
    envelope
        .response
        .ok_or_else(|| SessionError::InvalidResponse("missing `response` object".to_string()))
}

fn describe_eresult(code: u32) -> String {
    let name = match code {
        2 => "Fail",
        5 => "InvalidPassword",
        15 => "AccessDenied",
        18 => "FileNotFound",
        20 => "ServiceUnavailable",
        63 => "AccountLogonDenied",
        65 => "InvalidLoginAuthCode",
        84 => "RateLimitExceeded",
        88 => "TwoFactorCodeMismatch",
        _ => return format!("eresult {code}"),
    };
    format!("{name} (eresult {code})")
}
