//! Collaborator interfaces for looking up entities.
//!
//! Expansion never enumerates entities itself. It asks an [`EntityStore`] whether an entity
//! exists, which children it has, and for a loaded [`StoredDocument`] with its translations,
//! attachments and objects.

use refidx_model::{EntityKind, EntityReference, Locale};

use crate::StoreError;

/// Objects of one class attached to a document, in slot order.
///
/// A `None` slot is an object that was removed from the document.
pub type ObjectSlots = (String, Vec<Option<EntityReference>>);

/// Read access to the entities of a wiki farm.
pub trait EntityStore {
    /// Returns true if the entity exists.
    ///
    /// For a document with a non-root locale, this asks whether the translation exists.
    fn exists(&self, reference: &EntityReference) -> Result<bool, StoreError>;

    /// Loads a document.
    fn load_document(
        &self,
        document: &EntityReference,
    ) -> Result<Box<dyn StoredDocument + '_>, StoreError>;

    /// Lists the direct children of `parent` that have the given kind.
    ///
    /// Used for the spaces of a wiki, the documents and nested spaces of a space, and the
    /// properties of an object.
    fn list_children(
        &self,
        parent: &EntityReference,
        kind: EntityKind,
    ) -> Result<Vec<EntityReference>, StoreError>;
}

/// A loaded document.
pub trait StoredDocument {
    /// Lists the locales of the document's translations.
    fn translation_locales(&self) -> Result<Vec<Locale>, StoreError>;

    /// Lists the document's attachments.
    fn attachments(&self) -> Vec<EntityReference>;

    /// Lists the document's objects grouped by class.
    fn objects(&self) -> Vec<ObjectSlots>;
}
