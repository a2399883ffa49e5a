use super::common::{ColorMode, LogLevel, LogSession, LoggingArgs};
use super::config::Config;
use super::{Host, ProgressReporter};
use crate::Result;
use crate::analysis::SemgrepEngine;
use crate::facts::{FactsSnapshot, read_url_list};
use crate::metrics::MetricSet;
use crate::reports::{generate_console, generate_csv, generate_records, generate_table};
use crate::scoring::{Cancellation, ScoreRun, Scorer};
use camino::{Utf8Path, Utf8PathBuf};
use chrono::Utc;
use clap::Parser;
use core::time::Duration;
use directories::BaseDirs;
use ohno::{EnrichableExt, IntoAppError, app_err};
use std::fs;
use std::io::Write;
use std::sync::Arc;

const LOG_TARGET: &str = "     score";

#[derive(Parser, Debug)]
pub struct ScoreArgs {
    /// File listing the package URLs to score, one per line
    #[arg(value_name = "URL_FILE")]
    pub url_file: Utf8PathBuf,

    /// JSON-lines file with the repository facts for the listed URLs
    #[arg(long, value_name = "PATH")]
    pub facts: Utf8PathBuf,

    /// Path to configuration file (default is `trustrank.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Comma-separated metric weights replacing the configured ones, in metric order
    #[arg(long, value_name = "WEIGHTS", value_delimiter = ',', allow_negative_numbers = true)]
    pub weights: Option<Vec<f64>>,

    /// Directory where repositories are checked out for analysis
    #[arg(long, value_name = "PATH")]
    pub checkout_dir: Option<Utf8PathBuf>,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    #[command(flatten)]
    pub logging: LoggingArgs,

    /// Write the ranked tabular report to a file.
    /// If no report option is given, the tabular report is written to standard output.
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub table: Option<Utf8PathBuf>,

    /// Write JSON-lines score records, in input order, to a file
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub records: Option<Utf8PathBuf>,

    /// Write the ranked results to a CSV file
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub csv: Option<Utf8PathBuf>,

    /// Show the ranked results on the console
    #[arg(long, help_heading = "Report Output")]
    pub console: bool,
}

impl ScoreArgs {
    const fn writes_reports(&self) -> bool {
        self.table.is_some() || self.records.is_some() || self.csv.is_some() || self.console
    }
}

/// Score the repositories named in a URL list and write the requested reports.
pub async fn process_score<H: Host>(host: &mut H, args: &ScoreArgs) -> Result<()> {
    let _log_session = LogSession::open(&args.logging)?;

    let config = Config::load(Utf8Path::new("."), args.config.as_ref())?;
    let mut metrics = config.metric_set()?;
    if let Some(weights) = &args.weights {
        metrics = metrics.reweighted(weights).map_err(|e| e.enrich("applying --weights"))?;
    }

    let url_text = fs::read_to_string(&args.url_file).into_app_err_with(|| format!("reading URL list '{}'", args.url_file))?;
    let urls = read_url_list(&url_text);
    log::info!(target: LOG_TARGET, "Read {} package URLs from '{}'", urls.len(), args.url_file);

    let snapshot = FactsSnapshot::load(&args.facts)?;
    let facts = snapshot.resolve(&urls)?;

    let checkout_dir = match &args.checkout_dir {
        Some(path) => path.clone(),
        None => default_checkout_dir()?,
    };
    log::debug!(target: LOG_TARGET, "Checking out repositories under '{checkout_dir}'");

    let delay = if args.logging.log_level == LogLevel::None {
        Duration::from_millis(300)
    } else {
        Duration::from_hours(365 * 24)
    };
    let progress = ProgressReporter::new(delay, args.color.for_stderr());

    let scorer = Scorer::new(metrics, SemgrepEngine::new(checkout_dir, config.checkout_timeout), config.analysis_settings())
        .with_policy(config.rule_failure_policy)
        .with_concurrency(config.concurrency)
        .with_progress(Arc::new(progress));

    let cancellation = Cancellation::new();
    let ctrl_c = {
        let cancellation = cancellation.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                log::warn!(target: LOG_TARGET, "Interrupted, stopping after the repositories in progress");
                cancellation.cancel();
            }
        })
    };

    let run = scorer.score(facts, Utc::now(), &cancellation).await;
    ctrl_c.abort();
    let run = run?;

    for failure in &run.rule_failures {
        let _ = writeln!(host.error(), "warning: {failure}");
    }

    write_reports(host, args, scorer.metrics(), &run)
}

fn write_reports<H: Host>(host: &mut H, args: &ScoreArgs, metrics: &MetricSet, run: &ScoreRun) -> Result<()> {
    let ranked = run.ranked();

    if args.table.is_some() || !args.writes_reports() {
        let mut table = String::new();
        generate_table(&ranked, metrics, &mut table)?;
        match &args.table {
            Some(path) => fs::write(path, table).into_app_err_with(|| format!("writing tabular report '{path}'"))?,
            None => {
                let _ = write!(host.output(), "{table}");
            }
        }
    }

    if let Some(path) = &args.records {
        let mut records = String::new();
        generate_records(&run.scored, metrics, &mut records)?;
        fs::write(path, records).into_app_err_with(|| format!("writing score records '{path}'"))?;
    }

    if let Some(path) = &args.csv {
        let mut csv = String::new();
        generate_csv(&ranked, metrics, &mut csv)?;
        fs::write(path, csv).into_app_err_with(|| format!("writing CSV report '{path}'"))?;
    }

    if args.console {
        let mut console = String::new();
        generate_console(&ranked, metrics, args.color.for_stdout(), &mut console)?;
        let _ = write!(host.output(), "{console}");
    }

    Ok(())
}

fn default_checkout_dir() -> Result<Utf8PathBuf> {
    let dir = BaseDirs::new()
        .into_app_err("could not determine cache directory")?
        .cache_dir()
        .join("trustrank")
        .join("checkouts");

    Utf8PathBuf::from_path_buf(dir).map_err(|path| app_err!("cache directory '{}' is not valid UTF-8", path.display()))
}
