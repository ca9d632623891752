//! Environment variable handling for configuration overrides.
//!
//! This module provides support for `TABLEBOOK_*` environment variables that
//! override configuration file values.

use crate::config::schema::Config;
use crate::error::{Error, Result};
use crate::logging::LogLevel;
use std::env;

/// Overrides the expiry grace period, in minutes.
pub const GRACE_MINUTES_VAR: &str = "TABLEBOOK_GRACE_MINUTES";

/// Overrides log verbosity (`quiet`, `normal`, `verbose`).
pub const LOG_MODE_VAR: &str = "TABLEBOOK_LOG_MODE";

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use tablebook::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an unparseable value.
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(minutes) = env::var(GRACE_MINUTES_VAR) {
            let minutes = minutes.trim().parse().map_err(|_| Error::Validation {
                field: GRACE_MINUTES_VAR.into(),
                message: "Must be a positive integer".into(),
            })?;
            config
                .expiry
                .get_or_insert_with(Default::default)
                .grace_minutes = Some(minutes);
        }

        if let Ok(mode) = env::var(LOG_MODE_VAR) {
            let level = LogLevel::parse(&mode).map_err(|message| Error::Validation {
                field: LOG_MODE_VAR.into(),
                message,
            })?;
            config.log_mode = Some(level);
        }

        Ok(())
    }
}
