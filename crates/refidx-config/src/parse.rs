//! Configuration file parsing.
//!
//! Parses individual `.refidx.toml` files into `RawConfig` structures whose fields stay
//! optional until the files are merged.

use std::{fs, path::Path};

use serde::Deserialize;
#[cfg(test)]
use toml::de::Error as TomlError;

use crate::ConfigError;

/// Raw configuration as parsed directly from a TOML file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawConfig {
    /// When true, stop discovery here - ignore parent and global configs.
    pub root: Option<bool>,
    /// Default segment names.
    pub defaults: Option<RawDefaults>,
}

/// Raw `[defaults]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawDefaults {
    /// Default wiki name.
    pub wiki: Option<String>,
    /// Default space name.
    pub space: Option<String>,
    /// Default document name.
    pub document: Option<String>,
}

/// Parses a configuration file from disk.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` parameter is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses configuration from a TOML string without path context.
#[cfg(test)]
pub fn parse_config(contents: &str) -> Result<RawConfig, TomlError> {
    toml::from_str(contents)
}

/// Checks if a config file has `root = true` set.
///
/// Returns false if the file cannot be read or parsed.
pub fn is_root_config(path: &Path) -> bool {
    let Ok(contents) = fs::read_to_string(path) else {
        return false;
    };
    let Ok(config) = toml::from_str::<RawConfig>(&contents) else {
        return false;
    };
    config.root == Some(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ConfigTree;

    #[test]
    fn empty_config() {
        let config = parse_config("").unwrap();
        assert!(config.root.is_none());
        assert!(config.defaults.is_none());
    }

    #[test]
    fn partial_defaults() {
        let config = parse_config("[defaults]\nspace = \"Sandbox\"\n").unwrap();
        let defaults = config.defaults.unwrap();
        assert_eq!(defaults.space.as_deref(), Some("Sandbox"));
        assert!(defaults.wiki.is_none());
        assert!(defaults.document.is_none());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(parse_config("[defaults]\npage = \"x\"\n").is_err());
        assert!(parse_config("limit = 3\n").is_err());
    }

    #[test]
    fn parse_error_names_the_file() {
        let err = parse_config_str("root = ", Path::new("/tmp/.refidx.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ParseToml { .. }));
        assert!(err.to_string().contains("/tmp/.refidx.toml"));
    }

    #[test]
    fn missing_file_is_read_error() {
        let tree = ConfigTree::new();
        let err = parse_config_file(&tree.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadFile { .. }));
    }

    #[test]
    fn root_detection() {
        let tree = ConfigTree::new();
        assert!(is_root_config(&tree.config("a", "root = true\n")));
        assert!(!is_root_config(&tree.config("b", "")));
        assert!(!is_root_config(&tree.config("c", "root = [")));
    }
}
