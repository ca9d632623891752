//! Configuration schema definitions.
//!
//! This module defines the configuration structure for tablebook: opening
//! hours, the table registry, expiry settings, and log verbosity.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::hours::{OperatingHours, ServicePeriod, Session};
use crate::logging::LogLevel;

/// Format of times in configuration files.
pub const TIME_FORMAT: &str = "%H:%M";

/// Complete configuration structure.
///
/// # Examples
///
/// ```
/// use tablebook::config::{Config, TableConfig};
///
/// let config = Config {
///     tables: Some(vec![TableConfig { number: 1, capacity: 4 }]),
///     ..Default::default()
/// };
/// assert_eq!(config.tables.as_ref().unwrap().len(), 1);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Opening hours.
    pub hours: Option<HoursConfig>,

    /// Table registry.
    pub tables: Option<Vec<TableConfig>>,

    /// Expiry sweep settings.
    pub expiry: Option<ExpiryConfig>,

    /// Log verbosity.
    pub log_mode: Option<LogLevel>,
}

/// Opening hours, one session per service period.
///
/// # Examples
///
/// ```
/// use tablebook::config::{HoursConfig, SessionConfig};
///
/// let hours = HoursConfig {
///     am: SessionConfig { start: "11:30".into(), end: "14:30".into() },
///     pm: SessionConfig { start: "18:00".into(), end: "23:00".into() },
/// };
/// let parsed = hours.to_operating_hours().unwrap();
/// assert_eq!(parsed.pm().end().format("%H:%M").to_string(), "23:00");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct HoursConfig {
    /// Lunch session.
    pub am: SessionConfig,
    /// Dinner session.
    pub pm: SessionConfig,
}

impl Default for HoursConfig {
    fn default() -> Self {
        Self {
            am: SessionConfig {
                start: "11:00".into(),
                end: "15:00".into(),
            },
            pm: SessionConfig {
                start: "18:00".into(),
                end: "22:00".into(),
            },
        }
    }
}

impl HoursConfig {
    /// Parses the configured sessions into [`OperatingHours`].
    ///
    /// # Errors
    ///
    /// Returns an error if a time is not `HH:MM` or the sessions are out of order.
    pub fn to_operating_hours(&self) -> Result<OperatingHours> {
        let am = self.am.to_session(ServicePeriod::Am)?;
        let pm = self.pm.to_session(ServicePeriod::Pm)?;
        Ok(OperatingHours::new(am, pm)?)
    }
}

/// One session's opening and closing time as `HH:MM` strings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    /// Opening time.
    pub start: String,
    /// Closing time (exclusive).
    pub end: String,
}

impl SessionConfig {
    fn to_session(&self, period: ServicePeriod) -> Result<Session> {
        let start = parse_time(period, "start", &self.start)?;
        let end = parse_time(period, "end", &self.end)?;
        Ok(Session::new(period, start, end)?)
    }
}

pub(crate) fn parse_time(period: ServicePeriod, field: &str, value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), TIME_FORMAT).map_err(|e| Error::Validation {
        field: format!("hours.{period}.{field}"),
        message: format!("Invalid time '{value}' (expected HH:MM): {e}"),
    })
}

/// A table in the registry.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TableConfig {
    /// Table number (1 and up, unique).
    pub number: u32,
    /// Seating capacity (1 and up).
    pub capacity: u32,
}

/// Expiry sweep configuration.
///
/// # Examples
///
/// ```
/// use tablebook::config::ExpiryConfig;
///
/// let config = ExpiryConfig { grace_minutes: Some(30) };
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ExpiryConfig {
    /// Minutes an unconfirmed reservation is held past its time.
    pub grace_minutes: Option<u32>,
}
