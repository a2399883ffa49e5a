//! Command dispatch logic for trustrank

use super::{InitArgs, ScoreArgs, ValidateArgs, init_config, process_score, validate_config};
use crate::{Host, Result};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "trustrank", version, author, long_about = None)]
#[command(about = "Score and rank the trustworthiness of open-source packages")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: TrustrankSubcommand,
}

#[derive(Subcommand, Debug)]
enum TrustrankSubcommand {
    /// Score and rank the packages listed in a URL file
    Score(Box<ScoreArgs>),
    /// Generate a default configuration file
    Init(InitArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

/// Parse command-line arguments and run the selected command.
///
/// `args` includes the program name, as produced by `std::env::args()`.
pub async fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    match &Cli::parse_from(args).command {
        TrustrankSubcommand::Score(score_args) => process_score(host, score_args).await,
        TrustrankSubcommand::Init(init_args) => init_config(host, init_args),
        TrustrankSubcommand::Validate(validate_args) => validate_config(host, validate_args),
    }
}
