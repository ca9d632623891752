//! Configuration merging and precedence handling.
//!
//! This module implements hierarchical merging of configuration sources.

use crate::config::loader::ConfigSource;
use crate::config::schema::Config;

/// Merges configuration sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use tablebook::config::{Config, ConfigMerger, ExpiryConfig};
///
/// let low = Config {
///     expiry: Some(ExpiryConfig { grace_minutes: Some(30) }),
///     ..Default::default()
/// };
/// let high = Config {
///     expiry: Some(ExpiryConfig { grace_minutes: Some(15) }),
///     ..Default::default()
/// };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.expiry.unwrap().grace_minutes, Some(15));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge multiple configuration sources into final config.
    ///
    /// Sources should be provided in order from lowest to highest precedence.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();

        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }

        result
    }

    /// Merge source config into target (source overwrites target).
    ///
    /// # Merging Rules
    ///
    /// - Simple fields: source overwrites if Some
    /// - Hours: atomic replacement, both sessions together
    /// - Tables: complete replacement, never a union of registries
    /// - Expiry: field-by-field merge
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.hours.is_some() {
            target.hours.clone_from(&source.hours);
        }

        if source.tables.is_some() {
            target.tables.clone_from(&source.tables);
        }

        if let Some(ref expiry) = source.expiry {
            let target_expiry = target.expiry.get_or_insert_with(Default::default);
            if expiry.grace_minutes.is_some() {
                target_expiry.grace_minutes = expiry.grace_minutes;
            }
        }

        if source.log_mode.is_some() {
            target.log_mode = source.log_mode;
        }
    }
}
