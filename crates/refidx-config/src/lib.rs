//! Configuration system for refidx.
//!
//! refidx uses TOML configuration files named `.refidx.toml`. Configuration is resolved by
//! walking up the directory tree from the current working directory, collecting any
//! `.refidx.toml` files found, then loading `~/.refidx.toml` as the global config with
//! lowest precedence.
//!
//! The only section today is `[defaults]`, the wiki, space and document names used when
//! a reference leaves a segment unspecified.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod templates;
#[cfg(test)]
mod test_support;
mod validate;

use std::path::{Path, PathBuf};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{RawConfig, RawDefaults, parse_config_file, parse_config_str};
use refidx_model::EntityDefaults;
use serde::{Deserialize, Serialize};
pub use templates::template;
pub use validate::ConfigWarning;
use validate::validate_config;

/// Top-level merged configuration for refidx.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Default segment names.
    pub defaults: DefaultSettings,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.refidx.toml` files.
    ///
    /// This is the main entry point for loading configuration. It:
    /// 1. Discovers all `.refidx.toml` files from `cwd` up to the filesystem root
    /// 2. Appends `~/.refidx.toml` if it exists
    /// 3. Parses each file
    /// 4. Merges them according to precedence rules (closest to `cwd` wins)
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads only the global `~/.refidx.toml`.
    ///
    /// Returns the default configuration when the file does not exist.
    pub fn load_global() -> Result<Self, ConfigError> {
        let path = global_config_path().ok_or(ConfigError::NoHomeDirectory)?;
        if path.is_file() {
            Self::load_from_files(&[path])
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        let parsed = files
            .iter()
            .map(|path| {
                Ok(ParsedConfig {
                    path: path.clone(),
                    config: parse_config_file(path)?,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(merge_configs(&parsed))
    }

    /// Validates the configuration and returns any warnings.
    ///
    /// This checks for default names that are empty or contain a reference separator.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Returns the defaults in the form reference resolution consumes.
    pub fn entity_defaults(&self) -> EntityDefaults {
        EntityDefaults {
            wiki: self.defaults.wiki.clone(),
            space: self.defaults.space.clone(),
            document: self.defaults.document.clone(),
        }
    }

    /// Serializes the effective settings to TOML format.
    ///
    /// The output has the same layout as a `.refidx.toml` file.
    pub fn settings_to_toml(&self) -> Result<String, ConfigError> {
        let serializable = SerializableSettings {
            defaults: self.defaults.clone(),
        };
        Ok(toml::to_string_pretty(&serializable)?)
    }
}

/// Default segment names.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DefaultSettings {
    /// Default wiki name.
    pub wiki: String,
    /// Default top-level space name.
    pub space: String,
    /// Default document name, the home page of a space.
    pub document: String,
}

impl Default for DefaultSettings {
    fn default() -> Self {
        let EntityDefaults {
            wiki,
            space,
            document,
        } = EntityDefaults::default();
        Self {
            wiki,
            space,
            document,
        }
    }
}

/// Internal struct for TOML serialization of settings.
#[derive(Serialize)]
struct SerializableSettings {
    /// Default segment names.
    defaults: DefaultSettings,
}
