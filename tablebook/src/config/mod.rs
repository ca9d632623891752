//! Configuration system for tablebook.
//!
//! This module provides hierarchical configuration with support for:
//! - YAML configuration files (user config and project files)
//! - Environment variable overrides
//! - Programmatic configuration via builder pattern
//! - Validation of hours, tables, and expiry settings
//!
//! # Configuration Precedence
//!
//! Configuration is merged from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (`TABLEBOOK_*`)
//! 3. Private project config (`tablebook.local.yaml`)
//! 4. Project config (`tablebook.yaml`)
//! 5. User config (`~/.tablebook/config.yaml`)
//! 6. Built-in defaults
//!
//! # Examples
//!
//! ```no_run
//! use tablebook::config::ConfigBuilder;
//! use tablebook::Restaurant;
//! use std::path::Path;
//!
//! let config = ConfigBuilder::new()
//!     .with_working_dir(Path::new("/srv/bistro"))
//!     .build()
//!     .unwrap();
//!
//! let restaurant = Restaurant::from_config(&config).unwrap();
//! println!("{} tables", restaurant.tables().len());
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

#[cfg(test)]
mod proptests;

pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigSource};
pub use merger::ConfigMerger;
pub use schema::{Config, ExpiryConfig, HoursConfig, SessionConfig, TableConfig};
pub use validator::ConfigValidator;
