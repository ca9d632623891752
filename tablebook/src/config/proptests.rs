//! Property-based tests for configuration merging and validation.

use super::merger::ConfigMerger;
use super::schema::{Config, ExpiryConfig, TableConfig};
use super::validator::{ConfigValidator, MAX_GRACE_MINUTES};
use crate::logging::LogLevel;
use proptest::prelude::*;

fn log_level_strategy() -> impl Strategy<Value = LogLevel> {
    prop_oneof![
        Just(LogLevel::Quiet),
        Just(LogLevel::Normal),
        Just(LogLevel::Verbose),
    ]
}

// Registries with unique, positive numbers and positive capacities.
fn tables_strategy() -> impl Strategy<Value = Vec<TableConfig>> {
    prop::collection::btree_map(1u32..500, 1u32..=20, 1..12).prop_map(|m| {
        m.into_iter()
            .map(|(number, capacity)| TableConfig { number, capacity })
            .collect()
    })
}

fn config_strategy() -> impl Strategy<Value = Config> {
    (
        prop::option::of(tables_strategy()),
        prop::option::of(prop::option::of(1u32..=MAX_GRACE_MINUTES)),
        prop::option::of(log_level_strategy()),
    )
        .prop_map(|(tables, grace, log_mode)| Config {
            hours: None,
            tables,
            expiry: grace.map(|grace_minutes| ExpiryConfig { grace_minutes }),
            log_mode,
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 1000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn merge_with_empty_is_identity(config in config_strategy()) {
        let mut merged = config.clone();
        ConfigMerger::merge_into(&mut merged, &Config::default());
        prop_assert_eq!(merged, config);
    }

    #[test]
    fn higher_precedence_wins(low in config_strategy(), high in config_strategy()) {
        let mut merged = low.clone();
        ConfigMerger::merge_into(&mut merged, &high);

        prop_assert_eq!(merged.tables, high.tables.or(low.tables));
        prop_assert_eq!(merged.log_mode, high.log_mode.or(low.log_mode));

        let high_grace = high.expiry.and_then(|e| e.grace_minutes);
        let low_grace = low.expiry.and_then(|e| e.grace_minutes);
        prop_assert_eq!(
            merged.expiry.and_then(|e| e.grace_minutes),
            high_grace.or(low_grace)
        );
    }

    #[test]
    fn generated_configs_validate(config in config_strategy()) {
        prop_assert!(ConfigValidator::validate(&config).is_ok());
    }

    #[test]
    fn merging_valid_configs_stays_valid(a in config_strategy(), b in config_strategy()) {
        let mut merged = a;
        ConfigMerger::merge_into(&mut merged, &b);
        prop_assert!(ConfigValidator::validate(&merged).is_ok());
    }
}
