//! An in-memory entity store.
//!
//! [`MemoryStore`] backs embedding and tests. Besides holding entities it can be told to
//! fail specific lookups, which is how partial-failure behavior is exercised.

use std::collections::{HashMap, HashSet};

use refidx_model::{EntityKind, EntityReference, Locale, ObjectName};

use crate::{
    StoreError,
    store::{EntityStore, ObjectSlots, StoredDocument},
};

/// Entities kept in memory, in insertion order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// Every registered entity, without locale.
    entities: Vec<EntityReference>,
    /// Translation locales per document.
    translations: HashMap<EntityReference, Vec<Locale>>,
    /// Objects removed from their document; they keep an empty slot.
    removed: HashSet<EntityReference>,
    /// Entities whose existence check and child listing fail.
    failing: HashSet<EntityReference>,
    /// Documents that fail to load.
    failing_loads: HashSet<EntityReference>,
    /// Documents whose translation listing fails.
    failing_translations: HashSet<EntityReference>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an entity together with all of its ancestors.
    ///
    /// A locale on a document reference registers that translation.
    pub fn add(&mut self, reference: &EntityReference) -> &mut Self {
        for segment in reference.segments() {
            let segment = without_locale(segment);
            if !self.entities.contains(&segment) {
                self.entities.push(segment);
            }
        }
        if let Some(locale) = reference.locale()
            && !locale.is_root()
        {
            self.add_translation(reference, locale.clone());
        }
        self
    }

    /// Registers a translation of `document`.
    pub fn add_translation(&mut self, document: &EntityReference, locale: Locale) -> &mut Self {
        let base = without_locale(document);
        if !self.entities.contains(&base) {
            self.add(&base);
        }
        let locales = self.translations.entry(base).or_default();
        if !locales.contains(&locale) {
            locales.push(locale);
        }
        self
    }

    /// Removes an object from its document, leaving an empty slot behind.
    pub fn remove_object(&mut self, object: &EntityReference) -> &mut Self {
        self.removed.insert(without_locale(object));
        self
    }

    /// Makes existence checks and child listings for `reference` fail.
    pub fn fail_on(&mut self, reference: &EntityReference) -> &mut Self {
        self.failing.insert(without_locale(reference));
        self
    }

    /// Makes loading `document` fail.
    pub fn fail_load(&mut self, document: &EntityReference) -> &mut Self {
        self.failing_loads.insert(without_locale(document));
        self
    }

    /// Makes listing the translations of `document` fail.
    pub fn fail_translations(&mut self, document: &EntityReference) -> &mut Self {
        self.failing_translations.insert(without_locale(document));
        self
    }

    /// Returns true if the locale-free `reference` is registered and not removed.
    fn contains(&self, reference: &EntityReference) -> bool {
        self.entities.contains(reference) && !self.removed.contains(reference)
    }

    /// Returns the registered children of `parent`, removed ones included.
    fn children_of<'a>(
        &'a self,
        parent: &'a EntityReference,
        kind: EntityKind,
    ) -> impl Iterator<Item = &'a EntityReference> + 'a {
        self.entities
            .iter()
            .filter(move |e| e.kind() == kind && e.parent() == Some(parent))
    }

    /// Fails if `reference` was marked with [`fail_on`](Self::fail_on).
    fn check_failure(&self, reference: &EntityReference) -> Result<(), StoreError> {
        if self.failing.contains(reference) {
            return Err(StoreError::Backend(format!("lookup of {reference} failed")));
        }
        Ok(())
    }
}

impl EntityStore for MemoryStore {
    fn exists(&self, reference: &EntityReference) -> Result<bool, StoreError> {
        let base = without_locale(reference);
        self.check_failure(&base)?;

        match reference.locale() {
            Some(locale) if !locale.is_root() => Ok(self
                .translations
                .get(&base)
                .is_some_and(|locales| locales.contains(locale))),
            _ => Ok(self.contains(&base)),
        }
    }

    fn load_document(
        &self,
        document: &EntityReference,
    ) -> Result<Box<dyn StoredDocument + '_>, StoreError> {
        let base = without_locale(document);
        if self.failing_loads.contains(&base) {
            return Err(StoreError::Backend(format!("loading {base} failed")));
        }
        if base.kind() != EntityKind::Document || !self.contains(&base) {
            return Err(StoreError::NotFound(base.to_string()));
        }
        Ok(Box::new(MemoryDocument {
            store: self,
            document: base,
        }))
    }

    fn list_children(
        &self,
        parent: &EntityReference,
        kind: EntityKind,
    ) -> Result<Vec<EntityReference>, StoreError> {
        let base = without_locale(parent);
        self.check_failure(&base)?;
        Ok(self
            .children_of(&base, kind)
            .filter(|child| !self.removed.contains(*child))
            .cloned()
            .collect())
    }
}

/// A document loaded from a [`MemoryStore`].
struct MemoryDocument<'a> {
    /// Owning store.
    store: &'a MemoryStore,
    /// The document, without locale.
    document: EntityReference,
}

impl StoredDocument for MemoryDocument<'_> {
    fn translation_locales(&self) -> Result<Vec<Locale>, StoreError> {
        if self.store.failing_translations.contains(&self.document) {
            return Err(StoreError::Backend(format!(
                "listing translations of {} failed",
                self.document
            )));
        }
        Ok(self
            .store
            .translations
            .get(&self.document)
            .cloned()
            .unwrap_or_default())
    }

    fn attachments(&self) -> Vec<EntityReference> {
        self.store
            .children_of(&self.document, EntityKind::Attachment)
            .cloned()
            .collect()
    }

    fn objects(&self) -> Vec<ObjectSlots> {
        let mut groups: Vec<ObjectSlots> = Vec::new();

        for object in self.store.children_of(&self.document, EntityKind::Object) {
            let class = ObjectName::parse(object.name())
                .map_or_else(|_| object.name().to_string(), |name| name.class);
            let slot = (!self.store.removed.contains(object)).then(|| object.clone());

            match groups.iter_mut().find(|(c, _)| *c == class) {
                Some((_, slots)) => slots.push(slot),
                None => groups.push((class, vec![slot])),
            }
        }

        groups
    }
}

/// Returns `reference` without a locale.
fn without_locale(reference: &EntityReference) -> EntityReference {
    if reference.locale().is_none() {
        return reference.clone();
    }
    // Clearing a locale never fails.
    reference
        .with_locale(None)
        .unwrap_or_else(|_| reference.clone())
}
