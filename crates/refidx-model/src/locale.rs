//! Locale tags for documents.

use std::{fmt, str::FromStr};

use crate::ReferenceError;

/// A locale tag in `lang[_COUNTRY[_variant]]` form.
///
/// The empty tag is the root locale: the canonical, untranslated original of a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Locale(String);

impl Locale {
    /// Returns the root locale.
    pub fn root() -> Self {
        Self(String::new())
    }

    /// Parses a locale tag such as `fr`, `en_US` or `de_DE_1901`.
    pub fn parse(tag: &str) -> Result<Self, ReferenceError> {
        if tag.is_empty() {
            return Ok(Self::root());
        }

        let invalid = || ReferenceError::InvalidLocale(tag.to_string());
        let mut parts = tag.splitn(3, '_');
        let language = parts.next().unwrap_or_default();
        let country = parts.next();
        let variant = parts.next();

        let language_ok = (language.is_empty() && country.is_some())
            || ((2..=8).contains(&language.len())
                && language.chars().all(|c| c.is_ascii_lowercase()));
        if !language_ok {
            return Err(invalid());
        }

        if let Some(country) = country {
            let country_ok = (country.is_empty() && variant.is_some())
                || (country.len() == 2 && country.chars().all(|c| c.is_ascii_uppercase()))
                || (country.len() == 3 && country.chars().all(|c| c.is_ascii_digit()));
            if !country_ok {
                return Err(invalid());
            }
        }

        if let Some(variant) = variant
            && (variant.is_empty() || !variant.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'))
        {
            return Err(invalid());
        }

        Ok(Self(tag.to_string()))
    }

    /// Returns true for the root locale.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the tag, empty for the root locale.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Locale {
    type Err = ReferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
