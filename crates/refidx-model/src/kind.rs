//! Entity kinds and the parent rules between them.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The closed set of addressable entity kinds.
///
/// The string form (`WIKI`, `SPACE`, ...) is the kind marker stored in index records.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityKind {
    /// A wiki, the root of every chain.
    Wiki,
    /// A space; spaces nest.
    Space,
    /// A document (page), optionally locale-qualified.
    Document,
    /// A file attached to a document.
    Attachment,
    /// A structured object attached to a document.
    Object,
    /// A single property of an object.
    ObjectProperty,
}

/// Error returned when a kind marker is not recognized.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown entity kind: {0:?}")]
pub struct UnknownKind(pub String);

impl EntityKind {
    /// Every kind, root first.
    pub const ALL: [Self; 6] = [
        Self::Wiki,
        Self::Space,
        Self::Document,
        Self::Attachment,
        Self::Object,
        Self::ObjectProperty,
    ];

    /// Returns the kind marker string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Wiki => "WIKI",
            Self::Space => "SPACE",
            Self::Document => "DOCUMENT",
            Self::Attachment => "ATTACHMENT",
            Self::Object => "OBJECT",
            Self::ObjectProperty => "OBJECT_PROPERTY",
        }
    }

    /// Returns true if a segment of this kind may be parented under `parent`.
    ///
    /// `None` stands for "no parent", which only a wiki accepts.
    pub fn accepts_parent(self, parent: Option<Self>) -> bool {
        match (self, parent) {
            (Self::Wiki, None) => true,
            (Self::Space, Some(Self::Wiki | Self::Space)) => true,
            (Self::Document, Some(Self::Space)) => true,
            (Self::Attachment | Self::Object, Some(Self::Document)) => true,
            (Self::ObjectProperty, Some(Self::Object)) => true,
            _ => false,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}
