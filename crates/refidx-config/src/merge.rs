//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single resolved `Config`.

use std::path::PathBuf;

use crate::{
    Config, DefaultSettings,
    parse::{RawConfig, RawDefaults},
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

/// Merges configuration files into a single resolved `Config`.
///
/// Configs are given highest precedence first (closest to the working directory) and the
/// global config last. For each setting the first defined value wins.
pub fn merge_configs(configs: &[ParsedConfig]) -> Config {
    let mut defaults = DefaultSettings::default();

    // Lowest precedence first so closer files overwrite.
    for parsed in configs.iter().rev() {
        if let Some(ref raw) = parsed.config.defaults {
            apply_raw_defaults(&mut defaults, raw);
        }
    }

    let config_root = configs
        .first()
        .and_then(|c| c.path.parent())
        .map(|dir| dir.to_path_buf());

    Config {
        defaults,
        config_root,
    }
}

/// Applies raw defaults to result, overwriting any present values.
fn apply_raw_defaults(result: &mut DefaultSettings, raw: &RawDefaults) {
    if let Some(ref v) = raw.wiki {
        result.wiki = v.clone();
    }
    if let Some(ref v) = raw.space {
        result.space = v.clone();
    }
    if let Some(ref v) = raw.document {
        result.document = v.clone();
    }
}
