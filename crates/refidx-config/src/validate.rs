//! Configuration validation.
//!
//! Reports default names that would produce references which cannot be serialized back
//! unambiguously.

use std::fmt;

use refidx_model::{EntityKind, SEPARATORS};

use crate::Config;

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// A default name is empty.
    EmptyDefault {
        /// Kind whose default is empty.
        kind: EntityKind,
    },
    /// A default name contains a reference separator.
    SeparatorInDefault {
        /// Kind whose default contains the separator.
        kind: EntityKind,
        /// The offending name.
        name: String,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDefault { kind } => {
                write!(f, "default {kind} name is empty")
            }
            Self::SeparatorInDefault { kind, name } => {
                write!(
                    f,
                    "default {kind} name '{name}' contains a reference separator"
                )
            }
        }
    }
}

/// Validates the configuration and returns any warnings.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let defaults = &config.defaults;
    [
        (EntityKind::Wiki, &defaults.wiki),
        (EntityKind::Space, &defaults.space),
        (EntityKind::Document, &defaults.document),
    ]
    .into_iter()
    .filter_map(|(kind, name)| validate_name(kind, name))
    .collect()
}

/// Checks a single default name.
fn validate_name(kind: EntityKind, name: &str) -> Option<ConfigWarning> {
    if name.is_empty() {
        Some(ConfigWarning::EmptyDefault { kind })
    } else if name.contains(SEPARATORS) {
        Some(ConfigWarning::SeparatorInDefault {
            kind,
            name: name.to_string(),
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DefaultSettings;

    fn config(wiki: &str, space: &str, document: &str) -> Config {
        Config {
            defaults: DefaultSettings {
                wiki: wiki.into(),
                space: space.into(),
                document: document.into(),
            },
            config_root: None,
        }
    }

    #[test]
    fn default_config_is_clean() {
        assert!(validate_config(&Config::default()).is_empty());
    }

    #[test]
    fn empty_name_warns() {
        let warnings = validate_config(&config("", "Main", "WebHome"));
        assert_eq!(
            warnings,
            [ConfigWarning::EmptyDefault {
                kind: EntityKind::Wiki
            }]
        );
        assert_eq!(warnings[0].to_string(), "default WIKI name is empty");
    }

    #[test]
    fn separators_warn() {
        let warnings = validate_config(&config("xwiki", "Dev.Guide", "Web@Home"));
        assert_eq!(warnings.len(), 2);
        assert!(matches!(
            &warnings[0],
            ConfigWarning::SeparatorInDefault { kind: EntityKind::Space, name } if name == "Dev.Guide"
        ));
        assert!(warnings[1].to_string().contains("Web@Home"));
    }
}
