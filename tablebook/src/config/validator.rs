//! Configuration validation.
//!
//! Checks that hours parse and are ordered, that the table registry is
//! well formed, and that the grace period is usable.

use crate::config::schema::{Config, ExpiryConfig, HoursConfig, TableConfig};
use crate::error::{Error, Result};
use std::collections::HashSet;

/// Longest accepted grace period: one day.
pub const MAX_GRACE_MINUTES: u32 = 24 * 60;

/// Validates configuration values.
///
/// # Examples
///
/// ```
/// use tablebook::config::{Config, ConfigValidator};
///
/// let config = Config::default();
/// ConfigValidator::validate(&config).unwrap();
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// Absent sections are not an error; defaults fill them later.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the first offending field.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(ref hours) = config.hours {
            Self::validate_hours(hours)?;
        }

        if let Some(ref tables) = config.tables {
            Self::validate_tables(tables)?;
        }

        if let Some(ref expiry) = config.expiry {
            Self::validate_expiry(expiry)?;
        }

        Ok(())
    }

    fn validate_hours(hours: &HoursConfig) -> Result<()> {
        hours.to_operating_hours().map(|_| ())
    }

    /// Table numbers must be positive and unique, capacities positive.
    fn validate_tables(tables: &[TableConfig]) -> Result<()> {
        if tables.is_empty() {
            return Err(Error::Validation {
                field: "tables".into(),
                message: "At least one table is required".into(),
            });
        }

        let mut seen = HashSet::new();
        for (i, table) in tables.iter().enumerate() {
            if table.number == 0 {
                return Err(Error::Validation {
                    field: format!("tables[{i}].number"),
                    message: "Table number must be at least 1".into(),
                });
            }
            if table.capacity == 0 {
                return Err(Error::Validation {
                    field: format!("tables[{i}].capacity"),
                    message: "Capacity must be at least 1".into(),
                });
            }
            if !seen.insert(table.number) {
                return Err(Error::Validation {
                    field: format!("tables[{i}].number"),
                    message: format!("Duplicate table number {}", table.number),
                });
            }
        }

        Ok(())
    }

    fn validate_expiry(expiry: &ExpiryConfig) -> Result<()> {
        match expiry.grace_minutes {
            Some(0) => Err(Error::Validation {
                field: "expiry.grace_minutes".into(),
                message: "Grace period must be greater than 0".into(),
            }),
            Some(m) if m > MAX_GRACE_MINUTES => Err(Error::Validation {
                field: "expiry.grace_minutes".into(),
                message: format!("Grace period cannot exceed {MAX_GRACE_MINUTES} minutes"),
            }),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::SessionConfig;

    fn field_of(err: Error) -> String {
        match err {
            Error::Validation { field, .. } => field,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(ConfigValidator::validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_empty_table_registry() {
        let config = Config {
            tables: Some(vec![]),
            ..Default::default()
        };
        let err = ConfigValidator::validate(&config).unwrap_err();
        assert_eq!(field_of(err), "tables");
    }

    #[test]
    fn test_zero_table_number() {
        let config = Config {
            tables: Some(vec![TableConfig {
                number: 0,
                capacity: 4,
            }]),
            ..Default::default()
        };
        let err = ConfigValidator::validate(&config).unwrap_err();
        assert_eq!(field_of(err), "tables[0].number");
    }

    #[test]
    fn test_zero_capacity() {
        let config = Config {
            tables: Some(vec![
                TableConfig {
                    number: 1,
                    capacity: 2,
                },
                TableConfig {
                    number: 2,
                    capacity: 0,
                },
            ]),
            ..Default::default()
        };
        let err = ConfigValidator::validate(&config).unwrap_err();
        assert_eq!(field_of(err), "tables[1].capacity");
    }

    #[test]
    fn test_duplicate_table_number() {
        let config = Config {
            tables: Some(vec![
                TableConfig {
                    number: 3,
                    capacity: 2,
                },
                TableConfig {
                    number: 3,
                    capacity: 6,
                },
            ]),
            ..Default::default()
        };
        let err = ConfigValidator::validate(&config).unwrap_err();
        assert_eq!(field_of(err), "tables[1].number");
    }

    #[test]
    fn test_grace_bounds() {
        let with_grace = |minutes| Config {
            expiry: Some(ExpiryConfig {
                grace_minutes: Some(minutes),
            }),
            ..Default::default()
        };

        assert!(ConfigValidator::validate(&with_grace(0)).is_err());
        assert!(ConfigValidator::validate(&with_grace(1)).is_ok());
        assert!(ConfigValidator::validate(&with_grace(MAX_GRACE_MINUTES)).is_ok());
        assert!(ConfigValidator::validate(&with_grace(MAX_GRACE_MINUTES + 1)).is_err());
    }

    #[test]
    fn test_overlapping_sessions() {
        let config = Config {
            hours: Some(HoursConfig {
                am: SessionConfig {
                    start: "11:00".into(),
                    end: "19:00".into(),
                },
                pm: SessionConfig {
                    start: "18:00".into(),
                    end: "22:00".into(),
                },
            }),
            ..Default::default()
        };
        assert!(ConfigValidator::validate(&config).is_err());
    }
}
