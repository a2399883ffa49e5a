//! Command-line interface and orchestration for trustrank
//!
//! # Commands
//!
//! - **score**: read a URL list, resolve each URL against a facts snapshot, score and rank
//!   the repositories, and write the requested reports
//! - **init**: write the default configuration file
//! - **validate**: load a configuration file and report what it configures
//!
//! The `run` function parses the command line with clap and routes to the handler.
//! Handlers talk to the outside world through a [`Host`], so tests can capture what a
//! command prints.
//!
//! Configuration is a TOML file holding the metric list, the correctness rules, their
//! timeouts, the rule failure policy, and the scoring concurrency. Logging is set up
//! per command from `--log-level` and `--log-file`.

mod common;
mod config;
mod host;
mod init;
mod progress_reporter;
mod run;
mod score;
mod validate;

#[cfg(debug_assertions)]
pub use config::Config;

pub use common::{ColorMode, LogLevel, LoggingArgs};
pub use host::Host;
#[cfg(test)]
pub use host::TestHost;
pub use init::{InitArgs, init_config};
pub use progress_reporter::ProgressReporter;
pub use run::run;
pub use score::{ScoreArgs, process_score};
pub use validate::{ValidateArgs, validate_config};
