//! Error types for entity references.

use thiserror::Error;

use crate::EntityKind;

/// Errors that can occur when building, parsing or resolving references.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReferenceError {
    /// A segment was given an empty name.
    #[error("{kind} reference has an empty name")]
    EmptyName {
        /// Kind of the offending segment.
        kind: EntityKind,
    },

    /// A segment that needs a parent was built without one.
    #[error("{kind} reference requires a parent")]
    MissingParent {
        /// Kind of the orphaned segment.
        kind: EntityKind,
    },

    /// A segment was parented under a kind it cannot live in.
    #[error("{kind} reference cannot be parented under {parent}")]
    IllegalParent {
        /// Kind of the child segment.
        kind: EntityKind,
        /// Kind of the rejected parent.
        parent: EntityKind,
    },

    /// Only document references carry a locale.
    #[error("{kind} reference cannot carry a locale")]
    LocaleOnNonDocument {
        /// Kind of the reference that was given a locale.
        kind: EntityKind,
    },

    /// A locale tag did not match `lang[_COUNTRY[_variant]]`.
    #[error("invalid locale: {0:?}")]
    InvalidLocale(String),

    /// An object name did not match `Class[number]`.
    #[error("invalid object name: {0:?}")]
    InvalidObjectName(String),

    /// Serialized reference text could not be parsed.
    #[error("cannot resolve {text:?}: {message}")]
    Syntax {
        /// The text being resolved.
        text: String,
        /// What was wrong with it.
        message: String,
    },
}

impl ReferenceError {
    /// Creates a `Syntax` error for the given text.
    pub(crate) fn syntax(text: &str, message: impl Into<String>) -> Self {
        Self::Syntax {
            text: text.to_string(),
            message: message.into(),
        }
    }
}
