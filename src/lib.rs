//! steam-uwu: a random Steam avatar and an uwu-style CS2 profile summary.
//!
//! A run probes random account ids until one has an avatar, builds a themed
//! phrase, and (outside preview mode) logs into the configured account to
//! set the phrase as the profile summary.
//!
//! # Quick start
//!
//! ```no_run
//! use steam_uwu::app::{run, RunOptions, SteamServices};
//!
//! # async fn example() {
//! let options = RunOptions { preview: true, ..RunOptions::default() };
//! let result = run(&options, |name| std::env::var(name).ok(), &SteamServices)
//!     .await
//!     .unwrap();
//! println!("{} {}", result.avatar, result.description);
//! # }
//! ```

pub mod app;
pub mod build_info;
pub mod config;
pub mod discovery;
pub mod error;
pub mod http;
pub mod phrase;
pub mod publish;
pub mod steam;
#[cfg(test)]
pub mod testsupport;
