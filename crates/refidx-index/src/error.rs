//! Error types for the refidx-index crate.

use std::{io, path::PathBuf};

use refidx_model::{EntityKind, EntityReference, ReferenceError};
use tantivy::TantivyError;
use thiserror::Error;

/// Failures reported by an [`EntityStore`](crate::EntityStore).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The entity is not known to the store.
    #[error("entity not found: {0}")]
    NotFound(String),

    /// The store failed while answering.
    #[error("store failure: {0}")]
    Backend(String),
}

/// Errors raised while expanding, identifying or querying a reference.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The store failed on a lookup for the reference itself.
    #[error("lookup failed for {reference}: {source}")]
    Lookup {
        /// Reference whose lookup failed.
        reference: EntityReference,
        /// Store failure.
        source: StoreError,
    },

    /// A reference could not be built or taken apart.
    #[error(transparent)]
    Reference(#[from] ReferenceError),
}

impl ResolveError {
    /// Creates a `Lookup` error for `reference`.
    pub(crate) fn lookup(reference: &EntityReference, source: StoreError) -> Self {
        Self::Lookup {
            reference: reference.clone(),
            source,
        }
    }
}

/// Errors raised while rebuilding a reference from an index record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The record has no kind marker.
    #[error("record has no type field")]
    MissingKind,

    /// The kind marker is not a known kind.
    #[error("unsupported record type: {0}")]
    UnsupportedKind(String),

    /// A required field is missing, mistyped or holds an unusable value.
    #[error("malformed record field '{field}': {reason}")]
    MalformedRecord {
        /// Name of the offending field.
        field: &'static str,
        /// What was wrong with it.
        reason: String,
    },

    /// The decoded reference has no counterpart of the requested kind.
    #[error("cannot express {reference} as {kind}: {source}")]
    Normalize {
        /// Reference rebuilt from the record.
        reference: EntityReference,
        /// Requested kind.
        kind: EntityKind,
        /// Underlying failure.
        source: ReferenceError,
    },

    /// The record is not a JSON object of field values.
    #[error("invalid record JSON: {0}")]
    Json(String),
}

impl DecodeError {
    /// Creates a `MalformedRecord` error.
    pub(crate) fn malformed(field: &'static str, reason: impl ToString) -> Self {
        Self::MalformedRecord {
            field,
            reason: reason.to_string(),
        }
    }
}

/// Errors that can occur when working with a Tantivy record index.
#[derive(Debug, Error)]
pub enum IndexError {
    /// Failed to open or create the index.
    #[error("failed to open index at {path}: {message}")]
    OpenIndex {
        /// Path to the index directory.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Failed to write to the index.
    #[error("failed to write to index: {0}")]
    Write(String),

    /// Failed to commit changes to the index.
    #[error("failed to commit index: {0}")]
    Commit(String),

    /// Failed to search the index.
    #[error("failed to search index: {0}")]
    Search(String),

    /// A fragment clause names a field the schema does not have.
    #[error("unknown field in fragment: {0}")]
    UnknownField(String),

    /// A fragment clause value does not fit the field type.
    #[error("invalid value {value:?} for field '{field}'")]
    InvalidValue {
        /// Field name.
        field: String,
        /// Offending value.
        value: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl IndexError {
    /// Creates an `OpenIndex` error from a path and Tantivy error.
    pub(crate) fn open_index(path: PathBuf, source: &TantivyError) -> Self {
        Self::OpenIndex {
            path,
            message: source.to_string(),
        }
    }

    /// Creates a `Write` error from a Tantivy error.
    pub(crate) fn write(source: &TantivyError) -> Self {
        Self::Write(source.to_string())
    }

    /// Creates a `Commit` error from a Tantivy error.
    pub(crate) fn commit(source: &TantivyError) -> Self {
        Self::Commit(source.to_string())
    }

    /// Creates a `Search` error from a Tantivy error.
    pub(crate) fn search(source: &TantivyError) -> Self {
        Self::Search(source.to_string())
    }
}
