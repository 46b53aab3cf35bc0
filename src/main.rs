//! CLI entry point for steam-uwu.

mod cli;

use clap::Parser;
use steam_uwu::app::{execute, SteamServices};
use steam_uwu::build_info;
use steam_uwu::config::LOG_FILTER_VAR;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let args = match cli::Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            std::process::exit(cli::usage_exit_code(&err));
        }
    };
    init_logging();
    tracing::debug!(version = %build_info::version_line(), "starting");

    let options = args.run_options();
    let code = execute(
        &options,
        |name| std::env::var(name).ok(),
        &SteamServices,
        &mut std::io::stdout(),
        &mut std::io::stderr(),
    )
    .await;
    std::process::exit(code);
}

/// Log to stderr so stdout carries only the JSON result.
fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_FILTER_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
