//! CLI argument parsing via clap.

use clap::error::ErrorKind;
use clap::Parser;
use steam_uwu::app::RunOptions;
use steam_uwu::build_info::LONG_VERSION;
use steam_uwu::config::DEFAULT_MAX_ATTEMPTS;

/// Put a random Steam avatar next to a freshly uwu-ified CS2 profile summary.
///
/// Reads STEAM_API_KEY, STEAM_USERNAME, STEAM_PASSWORD and the optional
/// STEAM_SHARED_SECRET from the environment.
#[derive(Debug, Parser)]
#[command(name = "steam-uwu", version, long_version = LONG_VERSION)]
pub struct Args {
    /// Print the avatar and description without updating the profile.
    #[arg(short = 'p', long = "preview")]
    pub preview: bool,

    /// Random profiles to probe before giving up.
    #[arg(
        long = "max-attempts",
        value_name = "N",
        default_value_t = DEFAULT_MAX_ATTEMPTS,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub max_attempts: u32,

    /// Seed the random generator for a reproducible run.
    #[arg(long = "seed", value_name = "SEED")]
    pub seed: Option<u64>,
}

impl Args {
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            preview: self.preview,
            max_attempts: Some(self.max_attempts),
            seed: self.seed,
        }
    }
}

/// Exit code for a failed parse: 0 for `--help`/`--version`, 1 otherwise.
///
/// Bad flags count as a configuration error, so clap's usual 2 is never used.
pub fn usage_exit_code(err: &clap::Error) -> i32 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::{usage_exit_code, Args};
    use clap::Parser;

    #[test]
    fn preview_accepts_short_and_long_forms() {
        assert!(Args::parse_from(["steam-uwu", "--preview"]).preview);
        assert!(Args::parse_from(["steam-uwu", "-p"]).preview);
        assert!(!Args::parse_from(["steam-uwu"]).preview);
    }

    #[test]
    fn defaults_map_to_run_options() {
        let options = Args::parse_from(["steam-uwu"]).run_options();
        assert!(!options.preview);
        assert_eq!(options.max_attempts, Some(super::DEFAULT_MAX_ATTEMPTS));
        assert_eq!(options.seed, None);
    }

    #[test]
    fn seed_and_attempts_parse() {
        let args = Args::parse_from(["steam-uwu", "-p", "--seed", "42", "--max-attempts", "7"]);
        assert_eq!(args.seed, Some(42));
        assert_eq!(args.max_attempts, 7);
    }

    #[test]
    fn zero_attempts_is_rejected_with_exit_one() {
        let err = Args::try_parse_from(["steam-uwu", "--max-attempts", "0"]).expect_err("range");
        assert_eq!(usage_exit_code(&err), 1);
    }

    #[test]
    fn unknown_flag_exits_one() {
        let err = Args::try_parse_from(["steam-uwu", "--preview", "--verbose"])
            .expect_err("unknown flag");
        assert_eq!(usage_exit_code(&err), 1);
    }

    #[test]
    fn help_and_version_exit_zero() {
        for flag in ["--help", "--version"] {
            let err = Args::try_parse_from(["steam-uwu", flag]).expect_err("display");
            assert_eq!(usage_exit_code(&err), 0, "{flag}");
        }
    }
}
