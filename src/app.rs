//! Run orchestration: config, discovery, phrase, optional publish, output.

use std::io::Write;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::config::{load_config_with, Config, Credentials, USERNAME_VAR};
use crate::discovery::{discover_avatar, PlayerLookup, SteamWebApi};
use crate::error::{AppError, ConfigError};
use crate::http::build_http_client;
use crate::phrase::generate_description;
use crate::publish::{ProfilePublisher, SessionPublisher};

/// Options taken from the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Skip the profile write.
    pub preview: bool,
    /// Override for the discovery attempt cap.
    pub max_attempts: Option<u32>,
    /// Seed for reproducible randomness; entropy when absent.
    pub seed: Option<u64>,
}

/// The JSON document printed on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunResult {
    pub avatar: String,
    pub description: String,
}

/// Factory for the network-facing components.
///
/// Components are built only after configuration validated, so a bad
/// environment never reaches the network.
pub trait Services {
    fn lookup(&self, config: &Config) -> Box<dyn PlayerLookup>;

    fn publisher(&self, config: &Config, credentials: &Credentials) -> Box<dyn ProfilePublisher>;
}

/// Real Steam endpoints from `config`.
pub struct SteamServices;

impl Services for SteamServices {
    fn lookup(&self, config: &Config) -> Box<dyn PlayerLookup> {
        Box::new(SteamWebApi::new(
            build_http_client(config.network.http_timeout()),
            &config.endpoints.web_api,
            &config.api_key,
        ))
    }

    fn publisher(&self, config: &Config, credentials: &Credentials) -> Box<dyn ProfilePublisher> {
        Box::new(SessionPublisher::new(
            build_http_client(config.network.http_timeout()),
            config.endpoints.clone(),
            credentials.clone(),
        ))
    }
}

/// Run once and return the result document.
pub async fn run<FEnv, S>(
    options: &RunOptions,
    env_lookup: FEnv,
    services: &S,
) -> Result<RunResult, AppError>
where
    FEnv: Fn(&str) -> Option<String>,
    S: Services + ?Sized,
{
    let mut config = load_config_with(env_lookup, options.preview)?;
    if let Some(max_attempts) = options.max_attempts {
        config.discovery.max_attempts = max_attempts.max(1);
    }
    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let lookup = services.lookup(&config);
    let avatar = discover_avatar(lookup.as_ref(), &mut rng, &config.discovery).await?;
    let description = generate_description(&mut rng)?;

    if options.preview {
        tracing::info!("preview mode; profile left unchanged");
    } else {
        let credentials = config
            .credentials
            .as_ref()
            .ok_or(ConfigError::Missing(USERNAME_VAR))?;
        let mut publisher = services.publisher(&config, credentials);
        publisher.publish(&description).await?;
    }

    Ok(RunResult {
        avatar,
        description,
    })
}

/// Run once, print the outcome, and return the process exit code.
///
/// Success writes pretty JSON to `out` and returns 0; any error writes
/// `error: <message>` to `err` and returns 1.
pub async fn execute<FEnv, S, O, E>(
    options: &RunOptions,
    env_lookup: FEnv,
    services: &S,
    out: &mut O,
    err: &mut E,
) -> i32
where
    FEnv: Fn(&str) -> Option<String>,
    S: Services + ?Sized,
    O: Write,
    E: Write,
{
    let written = run(options, env_lookup, services)
        .await
        .and_then(|result| render_result(&result))
        .and_then(|text| writeln!(out, "{text}").map_err(|e| AppError::Output(e.to_string())));
    match written {
        Ok(()) => 0,
        Err(e) => {
            let _ = writeln!(err, "error: {e}");
            1
        }
    }
}

/// Pretty JSON with two-space indentation.
pub fn render_result(result: &RunResult) -> Result<String, AppError> {
    serde_json::to_string_pretty(result).map_err(|e| AppError::Output(e.to_string()))
}
