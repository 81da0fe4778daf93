//! Where a document sits in the flat index.
//!
//! The index stores a page as `(parent path, name, doc_final)`. A space's home page, the
//! document carrying the default name, is stored under the space's own name one level up
//! with `doc_final = false`; every other document is stored under its own name with
//! `doc_final = true`. Encoding, querying and decoding all go through this rule.

use refidx_model::{EntityDefaults, EntityKind, EntityReference, ReferenceError, serialize_local};

/// Position of a document in the flat index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLocation<'a> {
    /// Wiki or space that holds the page.
    pub parent: &'a EntityReference,
    /// Page name.
    pub name: &'a str,
    /// False for a space home page.
    pub is_final: bool,
}

impl<'a> PageLocation<'a> {
    /// Locates the document of `reference` (the reference itself or its nearest document).
    pub fn of(
        reference: &'a EntityReference,
        defaults: &EntityDefaults,
    ) -> Result<Self, ReferenceError> {
        let document = reference
            .extract(EntityKind::Document)
            .ok_or(ReferenceError::MissingParent {
                kind: reference.kind(),
            })?;
        let space = document.parent().ok_or(ReferenceError::MissingParent {
            kind: EntityKind::Document,
        })?;

        if document.name() == defaults.document {
            let parent = space.parent().ok_or(ReferenceError::MissingParent {
                kind: EntityKind::Space,
            })?;
            Ok(Self {
                parent,
                name: space.name(),
                is_final: false,
            })
        } else {
            Ok(Self {
                parent: space,
                name: document.name(),
                is_final: true,
            })
        }
    }

    /// Locates the home page of `space`.
    pub fn home_of(space: &'a EntityReference) -> Result<Self, ReferenceError> {
        let parent = space.parent().ok_or(ReferenceError::MissingParent {
            kind: EntityKind::Space,
        })?;
        Ok(Self {
            parent,
            name: space.name(),
            is_final: false,
        })
    }

    /// Returns the wiki name.
    pub fn wiki(&self) -> Option<&'a str> {
        self.parent.extract(EntityKind::Wiki).map(EntityReference::name)
    }

    /// Returns the local path of the parent space, empty when the parent is the wiki.
    pub fn space_path(&self) -> String {
        space_path(self.parent)
    }
}

/// Returns the local path of the nearest space of `reference`, or an empty path.
pub fn space_path(reference: &EntityReference) -> String {
    reference
        .extract(EntityKind::Space)
        .map(serialize_local)
        .unwrap_or_default()
}
