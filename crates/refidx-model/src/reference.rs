//! Immutable hierarchical entity references.
//!
//! A reference is a chain of `(name, kind)` segments from a wiki down to the addressed
//! item. Each segment holds its parent behind an [`Arc`], so deriving a new reference
//! (another locale, another parent) shares the untouched ancestors instead of copying them.

use std::{fmt, sync::Arc};

use crate::{EntityKind, Locale, ReferenceError, serialize::serialize};

/// A typed, named segment together with its ancestor chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityReference {
    /// Segment name; unique among the parent's children of the same kind.
    name: String,
    /// Segment kind.
    kind: EntityKind,
    /// Enclosing segment, `None` only for wikis.
    parent: Option<Arc<EntityReference>>,
    /// Non-root locale of a document reference; `None` for originals and other kinds.
    locale: Option<Locale>,
}

impl EntityReference {
    /// Creates a reference, checking the name and the parent kind.
    pub fn new(
        name: impl Into<String>,
        kind: EntityKind,
        parent: Option<&Self>,
    ) -> Result<Self, ReferenceError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ReferenceError::EmptyName { kind });
        }

        let parent_kind = parent.map(|p| p.kind);
        if !kind.accepts_parent(parent_kind) {
            return Err(match parent_kind {
                Some(parent) => ReferenceError::IllegalParent { kind, parent },
                None => ReferenceError::MissingParent { kind },
            });
        }

        Ok(Self {
            name,
            kind,
            parent: parent.map(|p| Arc::new(p.clone())),
            locale: None,
        })
    }

    /// Creates a wiki reference.
    pub fn wiki(name: impl Into<String>) -> Result<Self, ReferenceError> {
        Self::new(name, EntityKind::Wiki, None)
    }

    /// Creates a space reference under a wiki or another space.
    pub fn space(name: impl Into<String>, parent: &Self) -> Result<Self, ReferenceError> {
        Self::new(name, EntityKind::Space, Some(parent))
    }

    /// Creates a document reference (root locale) under a space.
    pub fn document(name: impl Into<String>, space: &Self) -> Result<Self, ReferenceError> {
        Self::new(name, EntityKind::Document, Some(space))
    }

    /// Creates an attachment reference under a document.
    pub fn attachment(name: impl Into<String>, document: &Self) -> Result<Self, ReferenceError> {
        Self::new(name, EntityKind::Attachment, Some(document))
    }

    /// Creates an object reference (`Class[number]`) under a document.
    pub fn object(name: impl Into<String>, document: &Self) -> Result<Self, ReferenceError> {
        Self::new(name, EntityKind::Object, Some(document))
    }

    /// Creates an object property reference under an object.
    pub fn object_property(
        name: impl Into<String>,
        object: &Self,
    ) -> Result<Self, ReferenceError> {
        Self::new(name, EntityKind::ObjectProperty, Some(object))
    }

    /// Returns the segment name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the segment kind.
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Returns the enclosing segment.
    pub fn parent(&self) -> Option<&Self> {
        self.parent.as_deref()
    }

    /// Returns the locale of a document reference.
    pub fn locale(&self) -> Option<&Locale> {
        self.locale.as_ref()
    }

    /// Returns true unless this is a document tagged with a non-root locale.
    ///
    /// Only originals own attachments and objects.
    pub fn is_original(&self) -> bool {
        self.locale.as_ref().is_none_or(Locale::is_root)
    }

    /// Returns a copy of this document reference tagged with `locale`.
    ///
    /// The root locale is stored as no locale, so a root-tagged document equals the
    /// untagged one.
    pub fn with_locale(&self, locale: Option<Locale>) -> Result<Self, ReferenceError> {
        let locale = locale.filter(|locale| !locale.is_root());
        if self.kind != EntityKind::Document && locale.is_some() {
            return Err(ReferenceError::LocaleOnNonDocument { kind: self.kind });
        }
        Ok(Self {
            locale,
            ..self.clone()
        })
    }

    /// Returns a copy of this segment moved under another parent.
    pub fn with_parent(&self, parent: &Self) -> Result<Self, ReferenceError> {
        let moved = Self::new(self.name.clone(), self.kind, Some(parent))?;
        Ok(Self {
            locale: self.locale.clone(),
            ..moved
        })
    }

    /// Returns the nearest segment of `kind`, starting with this one.
    pub fn extract(&self, kind: EntityKind) -> Option<&Self> {
        self.ancestors().find(|r| r.kind == kind)
    }

    /// Iterates from this segment up to the wiki.
    pub fn ancestors(&self) -> Ancestors<'_> {
        Ancestors {
            current: Some(self),
        }
    }

    /// Returns the chain from the wiki down to this segment.
    pub fn segments(&self) -> Vec<&Self> {
        let mut segments: Vec<&Self> = self.ancestors().collect();
        segments.reverse();
        segments
    }
}

impl fmt::Display for EntityReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&serialize(self))?;
        match &self.locale {
            Some(locale) if !locale.is_root() => write!(f, "({locale})"),
            _ => Ok(()),
        }
    }
}

/// Iterator over a reference and its ancestors, innermost first.
pub struct Ancestors<'a> {
    /// Next segment to yield.
    current: Option<&'a EntityReference>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a EntityReference;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;
        self.current = current.parent();
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> EntityReference {
        let wiki = EntityReference::wiki("xwiki").unwrap();
        let space = EntityReference::space("Dev", &wiki).unwrap();
        let nested = EntityReference::space("Guide", &space).unwrap();
        EntityReference::document("Setup", &nested).unwrap()
    }

    #[test]
    fn rejects_empty_names() {
        assert_eq!(
            EntityReference::wiki(""),
            Err(ReferenceError::EmptyName {
                kind: EntityKind::Wiki
            })
        );
    }

    #[test]
    fn rejects_illegal_parents() {
        let wiki = EntityReference::wiki("xwiki").unwrap();
        assert_eq!(
            EntityReference::document("Page", &wiki),
            Err(ReferenceError::IllegalParent {
                kind: EntityKind::Document,
                parent: EntityKind::Wiki,
            })
        );
        assert_eq!(
            EntityReference::new("Main", EntityKind::Space, None),
            Err(ReferenceError::MissingParent {
                kind: EntityKind::Space
            })
        );
        assert!(EntityReference::attachment("a.png", &page().parent().unwrap().clone()).is_err());
    }

    #[test]
    fn extract_walks_up() {
        let page = page();
        assert_eq!(page.extract(EntityKind::Document).unwrap().name(), "Setup");
        assert_eq!(page.extract(EntityKind::Space).unwrap().name(), "Guide");
        assert_eq!(page.extract(EntityKind::Wiki).unwrap().name(), "xwiki");
        assert!(page.extract(EntityKind::Attachment).is_none());
    }

    #[test]
    fn segments_are_root_first() {
        let page = page();
        let names: Vec<&str> = page.segments().iter().map(|s| s.name()).collect();
        assert_eq!(names, ["xwiki", "Dev", "Guide", "Setup"]);
    }

    #[test]
    fn locale_only_on_documents() {
        let page = page();
        let fr = page.with_locale(Some("fr".parse().unwrap())).unwrap();
        assert_eq!(fr.locale().unwrap().as_str(), "fr");
        assert!(!fr.is_original());
        assert!(page.is_original());
        assert!(page.with_locale(Some(Locale::root())).unwrap().is_original());

        let space = page.parent().unwrap();
        assert_eq!(
            space.with_locale(Some("fr".parse().unwrap())),
            Err(ReferenceError::LocaleOnNonDocument {
                kind: EntityKind::Space
            })
        );
    }

    #[test]
    fn root_locale_is_the_original() {
        let page = page();
        let root = page.with_locale(Some(Locale::root())).unwrap();
        assert_eq!(root, page);
        assert_eq!(root.locale(), None);

        let fr = page.with_locale(Some("fr".parse().unwrap())).unwrap();
        assert_eq!(fr.with_locale(Some(Locale::root())).unwrap(), page);
        assert!(page.parent().unwrap().with_locale(Some(Locale::root())).is_ok());
    }

    #[test]
    fn locale_distinguishes_references() {
        let page = page();
        let fr = page.with_locale(Some("fr".parse().unwrap())).unwrap();
        assert_ne!(page, fr);
        assert_eq!(fr.to_string(), "xwiki:Dev.Guide.Setup(fr)");
    }

    #[test]
    fn with_parent_keeps_name_and_locale() {
        let page = page()
            .with_locale(Some("de".parse().unwrap()))
            .unwrap();
        let dev = page.parent().unwrap().parent().unwrap();
        let moved = page.with_parent(dev).unwrap();
        assert_eq!(moved.name(), "Setup");
        assert_eq!(moved.locale(), page.locale());
        assert_eq!(moved.parent().unwrap().name(), "Dev");
    }
}
