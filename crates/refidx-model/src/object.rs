//! The `Class[number]` naming convention for objects.

use std::{fmt, str::FromStr};

use crate::ReferenceError;

/// An object name split into its class name and object number.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectName {
    /// Serialized class reference, e.g. `XWiki.TagClass`.
    pub class: String,
    /// Position of the object among the objects of that class.
    pub number: u32,
}

impl ObjectName {
    /// Creates an object name from its parts.
    pub fn new(class: impl Into<String>, number: u32) -> Self {
        Self {
            class: class.into(),
            number,
        }
    }

    /// Parses `Class[number]`.
    pub fn parse(name: &str) -> Result<Self, ReferenceError> {
        let invalid = || ReferenceError::InvalidObjectName(name.to_string());

        let body = name.strip_suffix(']').ok_or_else(invalid)?;
        let open = body.rfind('[').ok_or_else(invalid)?;
        let (class, number) = (&body[..open], &body[open + 1..]);

        if class.is_empty() || number.is_empty() || !number.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        Ok(Self {
            class: class.to_string(),
            number: number.parse().map_err(|_| invalid())?,
        })
    }
}

impl fmt::Display for ObjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.class, self.number)
    }
}

impl FromStr for ObjectName {
    type Err = ReferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
