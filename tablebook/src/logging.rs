//! Logging backend for the tablebook library.
//!
//! The library emits records through the [`log`] facade. This module provides
//! a small stderr backend with three verbosity levels that applications can
//! install once at startup.

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::io::Write;

use crate::config::environment::LOG_MODE_VAR;
use crate::config::Config;

/// Logging level for controlling output verbosity.
///
/// Log levels are ordered from least verbose (Quiet) to most verbose (Verbose).
///
/// # Examples
///
/// ```
/// use tablebook::LogLevel;
///
/// assert!(LogLevel::Quiet < LogLevel::Normal);
/// assert!(LogLevel::Normal < LogLevel::Verbose);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Suppress all output.
    Quiet,
    /// Errors and warnings.
    Normal,
    /// Errors, warnings, info, and debug messages.
    Verbose,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quiet => write!(f, "quiet"),
            Self::Normal => write!(f, "normal"),
            Self::Verbose => write!(f, "verbose"),
        }
    }
}

impl LogLevel {
    /// Parses a log level from a string.
    ///
    /// Recognizes: "quiet", "normal", "verbose" (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not recognized.
    ///
    /// # Examples
    ///
    /// ```
    /// use tablebook::LogLevel;
    ///
    /// assert_eq!(LogLevel::parse("quiet").unwrap(), LogLevel::Quiet);
    /// assert_eq!(LogLevel::parse("VERBOSE").unwrap(), LogLevel::Verbose);
    /// assert!(LogLevel::parse("invalid").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "quiet" => Ok(Self::Quiet),
            "normal" => Ok(Self::Normal),
            "verbose" => Ok(Self::Verbose),
            _ => Err(format!("invalid log level: {s}")),
        }
    }

    /// The most verbose [`log::Level`] this setting lets through.
    #[must_use]
    pub const fn filter(self) -> log::LevelFilter {
        match self {
            Self::Quiet => log::LevelFilter::Off,
            Self::Normal => log::LevelFilter::Warn,
            Self::Verbose => log::LevelFilter::Debug,
        }
    }
}

/// A stderr logger for the [`log`] facade.
///
/// # Examples
///
/// ```
/// use tablebook::{Logger, LogLevel};
/// use log::Log;
///
/// let logger = Logger::new(LogLevel::Normal);
/// assert!(logger.enabled(&log::Metadata::builder().level(log::Level::Warn).build()));
/// assert!(!logger.enabled(&log::Metadata::builder().level(log::Level::Info).build()));
/// ```
#[derive(Debug)]
pub struct Logger {
    level: LogLevel,
}

impl Logger {
    /// Creates a new logger with the specified log level.
    #[must_use]
    pub const fn new(level: LogLevel) -> Self {
        Self { level }
    }

    /// Returns the current log level.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }

    fn format(record: &log::Record<'_>) -> String {
        format!(
            "{}: [{}] {}",
            record.level(),
            record.target(),
            record.args()
        )
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LogLevel::Normal)
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.level() <= self.level.filter()
    }

    fn log(&self, record: &log::Record<'_>) {
        if self.enabled(record.metadata()) {
            // stderr is gone; nowhere left to report that
            let _ = writeln!(std::io::stderr().lock(), "{}", Self::format(record));
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Chooses a logger from command-line flags and the environment.
///
/// The priority order is:
/// 1. Flags (`verbose`, then `quiet`)
/// 2. `TABLEBOOK_LOG_MODE` environment variable
/// 3. Default (Normal)
///
/// An unrecognized `TABLEBOOK_LOG_MODE` value is ignored.
///
/// # Examples
///
/// ```
/// use tablebook::{init_logger, LogLevel};
///
/// let logger = init_logger(true, false);
/// assert_eq!(logger.level(), LogLevel::Verbose);
/// ```
#[must_use]
pub fn init_logger(verbose: bool, quiet: bool) -> Logger {
    if verbose {
        return Logger::new(LogLevel::Verbose);
    }
    if quiet {
        return Logger::new(LogLevel::Quiet);
    }

    if let Ok(env_value) = env::var(LOG_MODE_VAR) {
        if let Ok(level) = LogLevel::parse(&env_value) {
            return Logger::new(level);
        }
    }

    Logger::new(LogLevel::Normal)
}

/// Chooses a logger from command-line flags and loaded configuration.
///
/// Flags win as in [`init_logger`]; otherwise the configured `log_mode` is
/// used. A [`Config`] produced by [`ConfigBuilder`](crate::ConfigBuilder)
/// already carries any `TABLEBOOK_LOG_MODE` override, so the environment is
/// not consulted again here.
///
/// # Examples
///
/// ```
/// use tablebook::{init_logger_from_config, Config, LogLevel};
///
/// let config = Config {
///     log_mode: Some(LogLevel::Quiet),
///     ..Default::default()
/// };
/// assert_eq!(init_logger_from_config(&config, false, false).level(), LogLevel::Quiet);
/// assert_eq!(init_logger_from_config(&config, true, false).level(), LogLevel::Verbose);
/// ```
#[must_use]
pub fn init_logger_from_config(config: &Config, verbose: bool, quiet: bool) -> Logger {
    if verbose {
        return Logger::new(LogLevel::Verbose);
    }
    if quiet {
        return Logger::new(LogLevel::Quiet);
    }
    Logger::new(config.log_mode.unwrap_or(LogLevel::Normal))
}

/// Registers `logger` as the process-wide [`log`] backend.
///
/// # Errors
///
/// Returns an error if a logger has already been installed.
pub fn install_logger(logger: Logger) -> Result<(), log::SetLoggerError> {
    let filter = logger.level().filter();
    log::set_boxed_logger(Box::new(logger))?;
    log::set_max_level(filter);
    Ok(())
}
