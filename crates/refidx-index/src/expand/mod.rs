//! Reference expansion, identifiers and subtree queries.
//!
//! Every entity kind has an expander implementing [`ReferenceExpander`]:
//!
//! | kind            | expands to                                           |
//! |-----------------|------------------------------------------------------|
//! | wiki            | the expansion of each top-level space                |
//! | space           | its documents, then its nested spaces                |
//! | document        | itself, its translations, attachments and objects    |
//! | attachment      | itself                                               |
//! | object          | itself and its properties                            |
//! | object property | itself                                               |
//!
//! A missing entity expands to nothing. A failure on the entity itself is an error; a
//! failure on one of its children is logged, recorded in [`Expansion::skipped`], and does
//! not stop the siblings.
//!
//! [`Resolver`] picks the expander for a reference's kind.

mod attachment;
mod document;
mod object;
mod property;
mod space;
mod wiki;

pub use attachment::AttachmentExpander;
pub use document::DocumentExpander;
pub use object::ObjectExpander;
pub use property::PropertyExpander;
use refidx_model::{EntityDefaults, EntityKind, EntityReference, serialize};
use refidx_query::QueryFragment;
pub use space::SpaceExpander;
use tracing::{debug, warn};
pub use wiki::WikiExpander;

use crate::{
    ResolveError, fields,
    location::PageLocation,
    record::IndexRecord,
    store::EntityStore,
};

/// Expansion, identifier and query for one entity kind.
pub trait ReferenceExpander {
    /// Lists the references of the index records under `reference`.
    fn expand(&self, reference: &EntityReference) -> Result<Expansion, ResolveError>;

    /// Returns the index identifier of `reference`.
    fn identifier(&self, reference: &EntityReference) -> String {
        serialize(reference)
    }

    /// Returns the fragment selecting the records under `reference`.
    fn query(&self, reference: &EntityReference) -> Result<QueryFragment, ResolveError>;
}

/// Collaborators shared by all expanders.
#[derive(Clone, Copy)]
pub struct Context<'a> {
    /// Entity lookups.
    pub store: &'a dyn EntityStore,
    /// Default segment names.
    pub defaults: &'a EntityDefaults,
}

impl<'a> Context<'a> {
    /// Creates a context.
    pub fn new(store: &'a dyn EntityStore, defaults: &'a EntityDefaults) -> Self {
        Self { store, defaults }
    }

    /// Asks the store whether `reference` exists.
    pub(crate) fn exists(&self, reference: &EntityReference) -> Result<bool, ResolveError> {
        self.store
            .exists(reference)
            .map_err(|source| ResolveError::lookup(reference, source))
    }

    /// Lists the children of `reference` of the given kind.
    pub(crate) fn children(
        &self,
        reference: &EntityReference,
        kind: EntityKind,
    ) -> Result<Vec<EntityReference>, ResolveError> {
        self.store
            .list_children(reference, kind)
            .map_err(|source| ResolveError::lookup(reference, source))
    }
}

/// A child that was left out of an expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedChild {
    /// The child reference.
    pub reference: EntityReference,
    /// Why it was left out.
    pub error: ResolveError,
}

/// The references an expansion produced, and the children it had to skip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expansion {
    /// References of index records, in traversal order.
    pub references: Vec<EntityReference>,
    /// Children whose expansion failed.
    pub skipped: Vec<SkippedChild>,
}

impl Expansion {
    /// Creates an empty expansion.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a reference.
    pub fn push(&mut self, reference: EntityReference) {
        self.references.push(reference);
    }

    /// Appends everything another expansion produced or skipped.
    pub fn extend(&mut self, other: Self) {
        self.references.extend(other.references);
        self.skipped.extend(other.skipped);
    }

    /// Merges the result of expanding `child`, recording a failure instead of returning it.
    pub(crate) fn absorb(
        &mut self,
        child: &EntityReference,
        result: Result<Self, ResolveError>,
    ) {
        match result {
            Ok(expansion) => self.extend(expansion),
            Err(error) => {
                warn!(reference = %child, %error, "skipping child that could not be expanded");
                self.skipped.push(SkippedChild {
                    reference: child.clone(),
                    error,
                });
            }
        }
    }

    /// Returns true if nothing was produced or skipped.
    pub fn is_empty(&self) -> bool {
        self.references.is_empty() && self.skipped.is_empty()
    }
}

/// Picks the expander for a reference's kind.
///
/// The resolver holds only shared borrows, so it is cheap to copy and can be used from many
/// threads when the store is `Sync`.
#[derive(Clone, Copy)]
pub struct Resolver<'a> {
    /// Wiki expander.
    wiki: WikiExpander<'a>,
    /// Space expander.
    space: SpaceExpander<'a>,
    /// Document expander.
    document: DocumentExpander<'a>,
    /// Attachment expander.
    attachment: AttachmentExpander<'a>,
    /// Object expander.
    object: ObjectExpander<'a>,
    /// Object property expander.
    property: PropertyExpander<'a>,
    /// Shared collaborators.
    cx: Context<'a>,
}

impl<'a> Resolver<'a> {
    /// Creates a resolver over `store` using `defaults` for unnamed segments.
    pub fn new(store: &'a dyn EntityStore, defaults: &'a EntityDefaults) -> Self {
        let cx = Context::new(store, defaults);
        Self {
            wiki: WikiExpander::new(cx),
            space: SpaceExpander::new(cx),
            document: DocumentExpander::new(cx),
            attachment: AttachmentExpander::new(cx),
            object: ObjectExpander::new(cx),
            property: PropertyExpander::new(cx),
            cx,
        }
    }

    /// Returns the expander for `kind`.
    pub fn for_kind(&self, kind: EntityKind) -> &dyn ReferenceExpander {
        match kind {
            EntityKind::Wiki => &self.wiki,
            EntityKind::Space => &self.space,
            EntityKind::Document => &self.document,
            EntityKind::Attachment => &self.attachment,
            EntityKind::Object => &self.object,
            EntityKind::ObjectProperty => &self.property,
        }
    }

    /// Lists the references of the index records under `reference`.
    pub fn expand(&self, reference: &EntityReference) -> Result<Expansion, ResolveError> {
        let expansion = self.for_kind(reference.kind()).expand(reference)?;
        debug!(
            %reference,
            records = expansion.references.len(),
            skipped = expansion.skipped.len(),
            "expanded reference"
        );
        Ok(expansion)
    }

    /// Returns the index identifier of `reference`.
    pub fn identifier(&self, reference: &EntityReference) -> String {
        self.for_kind(reference.kind()).identifier(reference)
    }

    /// Returns the fragment selecting the records under `reference`.
    pub fn query(&self, reference: &EntityReference) -> Result<QueryFragment, ResolveError> {
        self.for_kind(reference.kind()).query(reference)
    }

    /// Returns the field set an indexer writes for `reference`.
    ///
    /// A wiki record carries only the wiki; a space record describes the space's home page.
    pub fn record(&self, reference: &EntityReference) -> Result<IndexRecord, ResolveError> {
        let kind = reference.kind();
        let mut record = IndexRecord::new()
            .with(fields::ID, self.identifier(reference))
            .with(fields::TYPE, kind.as_str());

        let location = match kind {
            EntityKind::Wiki => {
                record.insert(fields::WIKI, reference.name());
                return Ok(record);
            }
            EntityKind::Space => PageLocation::home_of(reference)?,
            EntityKind::Document
            | EntityKind::Attachment
            | EntityKind::Object
            | EntityKind::ObjectProperty => PageLocation::of(reference, self.cx.defaults)?,
        };

        if let Some(wiki) = location.wiki() {
            record.insert(fields::WIKI, wiki);
        }
        record.insert(fields::SPACE, location.space_path());
        record.insert(fields::NAME, location.name);
        record.insert(fields::DOC_FINAL, location.is_final);

        if kind == EntityKind::Document
            && let Some(locale) = reference.locale()
            && !locale.is_root()
        {
            record.insert(fields::LOCALE, locale.as_str());
        }

        match kind {
            EntityKind::Attachment => record.insert(fields::FILENAME, reference.name()),
            EntityKind::Object => object::insert_fields(&mut record, reference)?,
            EntityKind::ObjectProperty => {
                if let Some(object) = reference.parent() {
                    object::insert_fields(&mut record, object)?;
                }
                record.insert(fields::PROPERTY, reference.name());
            }
            EntityKind::Wiki | EntityKind::Space | EntityKind::Document => {}
        }

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use refidx_model::Locale;

    use super::*;
    use crate::{MemoryStore, StoreError};

    fn page(name: &str) -> EntityReference {
        let wiki = EntityReference::wiki("xwiki").unwrap();
        let space = EntityReference::space("Dev", &wiki).unwrap();
        EntityReference::document(name, &space).unwrap()
    }

    #[test]
    fn dispatches_on_kind() {
        let store = MemoryStore::new();
        let defaults = EntityDefaults::default();
        let resolver = Resolver::new(&store, &defaults);

        let attachment = EntityReference::attachment("a.txt", &page("Setup")).unwrap();
        assert_eq!(resolver.identifier(&attachment), "xwiki:Dev.Setup@a.txt");
        assert_eq!(resolver.identifier(&page("Setup")), "xwiki:Dev.Setup_");
    }

    #[test]
    fn record_of_named_document() {
        let store = MemoryStore::new();
        let defaults = EntityDefaults::default();
        let resolver = Resolver::new(&store, &defaults);

        let doc = page("Setup")
            .with_locale(Some(Locale::parse("fr").unwrap()))
            .unwrap();
        let record = resolver.record(&doc).unwrap();

        assert_eq!(record.get_str(fields::ID), Some("xwiki:Dev.Setup_fr"));
        assert_eq!(record.get_str(fields::TYPE), Some("DOCUMENT"));
        assert_eq!(record.get_str(fields::WIKI), Some("xwiki"));
        assert_eq!(record.get_str(fields::SPACE), Some("Dev"));
        assert_eq!(record.get_str(fields::NAME), Some("Setup"));
        assert_eq!(record.get_bool(fields::DOC_FINAL), Some(true));
        assert_eq!(record.get_str(fields::LOCALE), Some("fr"));
    }

    #[test]
    fn record_of_home_page_and_space_agree() {
        let store = MemoryStore::new();
        let defaults = EntityDefaults::default();
        let resolver = Resolver::new(&store, &defaults);

        let home = resolver.record(&page("WebHome")).unwrap();
        let space = resolver.record(page("WebHome").parent().unwrap()).unwrap();

        for field in [fields::WIKI, fields::SPACE, fields::NAME, fields::DOC_FINAL] {
            assert_eq!(home.get(field), space.get(field), "{field}");
        }
        assert_eq!(home.get_str(fields::SPACE), Some(""));
        assert_eq!(home.get_str(fields::NAME), Some("Dev"));
        assert_eq!(home.get_bool(fields::DOC_FINAL), Some(false));
        assert_eq!(space.get_str(fields::TYPE), Some("SPACE"));
    }

    #[test]
    fn record_of_object_property() {
        let store = MemoryStore::new();
        let defaults = EntityDefaults::default();
        let resolver = Resolver::new(&store, &defaults);

        let object = EntityReference::object("XWiki.TagClass[2]", &page("Setup")).unwrap();
        let property = EntityReference::object_property("tags", &object).unwrap();
        let record = resolver.record(&property).unwrap();

        assert_eq!(record.get_str(fields::CLASS), Some("XWiki.TagClass"));
        assert_eq!(record.get_u64(fields::NUMBER), Some(2));
        assert_eq!(record.get_str(fields::PROPERTY), Some("tags"));
        assert_eq!(record.get_str(fields::LOCALE), None);
    }

    #[test]
    fn record_of_wiki() {
        let store = MemoryStore::new();
        let defaults = EntityDefaults::default();
        let resolver = Resolver::new(&store, &defaults);

        let record = resolver.record(&EntityReference::wiki("xwiki").unwrap()).unwrap();
        assert_eq!(record.len(), 3);
        assert_eq!(record.get_str(fields::ID), Some("xwiki"));
    }

    #[test]
    fn absorb_records_failures() {
        let child = page("Broken");
        let mut expansion = Expansion::new();
        expansion.absorb(&page("Fine"), Ok(Expansion {
            references: vec![page("Fine")],
            skipped: vec![],
        }));
        expansion.absorb(
            &child,
            Err(ResolveError::lookup(&child, StoreError::Backend("down".into()))),
        );

        assert_eq!(expansion.references, vec![page("Fine")]);
        assert_eq!(expansion.skipped.len(), 1);
        assert_eq!(expansion.skipped[0].reference, child);
    }
}
