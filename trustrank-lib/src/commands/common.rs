//! Argument types and run setup shared between commands.

use crate::Result;
use camino::Utf8PathBuf;
use clap::{Args, ValueEnum};
use ohno::IntoAppError;
use std::fs::File;
use std::io::IsTerminal;

/// Color mode configuration for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Always use colors
    Always,

    /// Never use colors
    Never,

    /// Use colors if the output is a terminal, otherwise don't use colors
    Auto,
}

impl ColorMode {
    /// Decide whether to emit colors for a stream with the given terminal status.
    #[must_use]
    pub const fn use_colors(self, is_terminal: bool) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => is_terminal,
        }
    }

    #[must_use]
    pub fn for_stdout(self) -> bool {
        self.use_colors(std::io::stdout().is_terminal())
    }

    #[must_use]
    pub fn for_stderr(self) -> bool {
        self.use_colors(std::io::stderr().is_terminal())
    }
}

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,

    /// Only error messages
    Error,

    /// Warning and error messages
    Warn,

    /// Info, warning, and error messages
    Info,

    /// Debug, info, warning, and error messages
    Debug,

    /// Trace, debug, info, warning, and error messages
    Trace,
}

impl LogLevel {
    const fn filter(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Error => Some("error"),
            Self::Warn => Some("warn"),
            Self::Info => Some("info"),
            Self::Debug => Some("debug"),
            Self::Trace => Some("trace"),
        }
    }
}

/// Diagnostic logging arguments
#[derive(Args, Debug, Clone)]
pub struct LoggingArgs {
    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none", global = true)]
    pub log_level: LogLevel,

    /// Write diagnostic output to this file instead of stderr
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<Utf8PathBuf>,
}

/// Logging for the duration of one command.
///
/// The logger is installed when the session is opened and flushed when it is dropped.
#[derive(Debug)]
pub struct LogSession {
    enabled: bool,
}

impl LogSession {
    /// Install the process logger according to the requested level and destination.
    ///
    /// Only the first session in a process installs a logger; later sessions reuse it.
    pub fn open(args: &LoggingArgs) -> Result<Self> {
        let Some(level) = args.log_level.filter() else {
            return Ok(Self { enabled: false });
        };

        let env = env_logger::Env::default().filter_or("RUST_LOG", level);
        let mut builder = env_logger::Builder::from_env(env);
        let _ = builder
            .format_timestamp(None)
            .format_module_path(false)
            .format_target(matches!(args.log_level, LogLevel::Debug | LogLevel::Trace));

        if let Some(path) = &args.log_file {
            let file = File::create(path).into_app_err_with(|| format!("creating log file '{path}'"))?;
            let _ = builder.target(env_logger::Target::Pipe(Box::new(file))).write_style(env_logger::WriteStyle::Never);
        }

        if builder.try_init().is_err() {
            log::debug!("A logger is already installed, keeping it");
        }

        Ok(Self { enabled: true })
    }
}

impl Drop for LogSession {
    fn drop(&mut self) {
        if self.enabled {
            log::logger().flush();
        }
    }
}
