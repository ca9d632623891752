//! Layered configuration assembly.

use crate::config::environment::EnvironmentConfig;
use crate::config::loader::ConfigLoader;
use crate::config::merger::ConfigMerger;
use crate::config::schema::{Config, ExpiryConfig, HoursConfig};
use crate::config::validator::ConfigValidator;
use crate::error::Result;
use crate::logging::LogLevel;
use crate::manager::DEFAULT_GRACE_MINUTES;
use std::path::{Path, PathBuf};

/// Builds a [`Config`] from defaults, files, environment, and overrides.
///
/// Each layer overrides the one before it:
///
/// 1. Built-in defaults
/// 2. User and project files (see [`ConfigLoader::load_all`])
/// 3. `TABLEBOOK_*` environment variables
/// 4. The config passed to [`with_config`](Self::with_config)
///
/// # Examples
///
/// ```
/// use tablebook::config::{Config, ConfigBuilder, TableConfig};
///
/// let config = ConfigBuilder::new()
///     .skip_files()
///     .skip_env()
///     .with_config(Config {
///         tables: Some(vec![TableConfig { number: 1, capacity: 4 }]),
///         ..Default::default()
///     })
///     .build()
///     .unwrap();
///
/// assert_eq!(config.expiry.unwrap().grace_minutes, Some(30));
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    working_dir: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    skip_files: bool,
    skip_env: bool,
    overrides: Option<Config>,
}

impl ConfigBuilder {
    /// Create a builder that loads every layer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory to start project config discovery from.
    ///
    /// Defaults to the process's current directory.
    #[must_use]
    pub fn with_working_dir(mut self, dir: &Path) -> Self {
        self.working_dir = Some(dir.to_path_buf());
        self
    }

    /// Directory holding the user `config.yaml`, in place of `~/.tablebook`.
    #[must_use]
    pub fn with_data_dir(mut self, dir: &Path) -> Self {
        self.data_dir = Some(dir.to_path_buf());
        self
    }

    /// Do not read any configuration files.
    #[must_use]
    pub fn skip_files(mut self) -> Self {
        self.skip_files = true;
        self
    }

    /// Ignore `TABLEBOOK_*` environment variables.
    #[must_use]
    pub fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Apply a programmatic config on top of everything else.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.overrides = Some(config);
        self
    }

    /// The configuration every build starts from.
    #[must_use]
    pub fn defaults() -> Config {
        Config {
            hours: Some(HoursConfig::default()),
            tables: None,
            expiry: Some(ExpiryConfig {
                grace_minutes: Some(DEFAULT_GRACE_MINUTES),
            }),
            log_mode: Some(LogLevel::Normal),
        }
    }

    /// Assemble and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be read or parsed, an environment
    /// variable is malformed, or the merged result fails validation.
    pub fn build(self) -> Result<Config> {
        let mut config = Self::defaults();

        if !self.skip_files {
            let working_dir = match self.working_dir {
                Some(dir) => dir,
                None => std::env::current_dir()?,
            };
            let sources = ConfigLoader::load_all(&working_dir, self.data_dir.as_deref())?;
            for source in &sources {
                log::debug!("Loaded config from {}", source.path.display());
                ConfigValidator::validate(&source.config)?;
            }
            ConfigMerger::merge_into(&mut config, &ConfigMerger::merge(sources));
        }

        if !self.skip_env {
            EnvironmentConfig::apply_overrides(&mut config)?;
        }

        if let Some(ref overrides) = self.overrides {
            ConfigMerger::merge_into(&mut config, overrides);
        }

        ConfigValidator::validate(&config)?;
        Ok(config)
    }
}
