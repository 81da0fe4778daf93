//! Document expansion.

use refidx_model::{EntityReference, serialize};
use refidx_query::QueryFragment;

use super::{
    AttachmentExpander, Context, Expansion, ObjectExpander, ReferenceExpander, SpaceExpander,
};
use crate::{ResolveError, fields, location::PageLocation};

/// Expands a document into itself and, for an original, its translations, attachments
/// and objects.
#[derive(Clone, Copy)]
pub struct DocumentExpander<'a> {
    /// Shared collaborators.
    cx: Context<'a>,
}

impl<'a> DocumentExpander<'a> {
    /// Creates the expander.
    pub fn new(cx: Context<'a>) -> Self {
        Self { cx }
    }
}

impl ReferenceExpander for DocumentExpander<'_> {
    fn expand(&self, reference: &EntityReference) -> Result<Expansion, ResolveError> {
        let mut expansion = Expansion::new();
        if !self.cx.exists(reference)? {
            return Ok(expansion);
        }
        expansion.push(reference.clone());

        // A translation owns nothing but its own record.
        if !reference.is_original() {
            return Ok(expansion);
        }

        let lookup = |source| ResolveError::lookup(reference, source);
        let document = self.cx.store.load_document(reference).map_err(lookup)?;

        for locale in document.translation_locales().map_err(lookup)? {
            if !locale.is_root() {
                expansion.push(reference.with_locale(Some(locale))?);
            }
        }

        let attachments = AttachmentExpander::new(self.cx);
        for attachment in document.attachments() {
            expansion.absorb(&attachment, attachments.expand(&attachment));
        }

        let objects = ObjectExpander::new(self.cx);
        for (_, slots) in document.objects() {
            for object in slots.into_iter().flatten() {
                expansion.absorb(&object, objects.expand(&object));
            }
        }

        Ok(expansion)
    }

    /// Returns the serialized document followed by `_` and its locale tag.
    ///
    /// Originals end in `_`, so a document without locale and one with the root locale
    /// share an identifier.
    fn identifier(&self, reference: &EntityReference) -> String {
        let locale = reference.locale().map_or("", |locale| locale.as_str());
        format!("{}_{locale}", serialize(reference))
    }

    fn query(&self, reference: &EntityReference) -> Result<QueryFragment, ResolveError> {
        let location = PageLocation::of(reference, self.cx.defaults)?;
        let parent = SpaceExpander::new(self.cx).query(location.parent)?;
        Ok(parent
            .clause(fields::NAME, location.name)
            .clause(fields::DOC_FINAL, location.is_final.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use refidx_model::{EntityDefaults, Locale};

    use super::*;
    use crate::{MemoryStore, StoreError};

    fn setup() -> EntityReference {
        let wiki = EntityReference::wiki("xwiki").unwrap();
        let space = EntityReference::space("Dev", &wiki).unwrap();
        EntityReference::document("Setup", &space).unwrap()
    }

    fn locale(tag: &str) -> Locale {
        Locale::parse(tag).unwrap()
    }

    #[test]
    fn original_expands_to_everything_it_owns() {
        let doc = setup();
        let attachment = EntityReference::attachment("a.png", &doc).unwrap();
        let tag = EntityReference::object("XWiki.TagClass[0]", &doc).unwrap();
        let tags = EntityReference::object_property("tags", &tag).unwrap();

        let mut store = MemoryStore::new();
        store
            .add(&attachment)
            .add(&tags)
            .add_translation(&doc, locale("fr"));
        let defaults = EntityDefaults::default();

        let expansion = DocumentExpander::new(Context::new(&store, &defaults))
            .expand(&doc)
            .unwrap();
        assert_eq!(
            expansion.references,
            vec![
                doc.clone(),
                doc.with_locale(Some(locale("fr"))).unwrap(),
                attachment,
                tag,
                tags,
            ]
        );
        assert!(expansion.skipped.is_empty());
    }

    #[test]
    fn translation_expands_to_itself() {
        let doc = setup();
        let french = doc.with_locale(Some(locale("fr"))).unwrap();
        let mut store = MemoryStore::new();
        store
            .add(&EntityReference::attachment("a.png", &doc).unwrap())
            .add(&french);
        let defaults = EntityDefaults::default();

        let expansion = DocumentExpander::new(Context::new(&store, &defaults))
            .expand(&french)
            .unwrap();
        assert_eq!(expansion.references, vec![french]);
    }

    #[test]
    fn removed_object_slots_are_ignored() {
        let doc = setup();
        let first = EntityReference::object("XWiki.Comment[0]", &doc).unwrap();
        let second = EntityReference::object("XWiki.Comment[1]", &doc).unwrap();
        let mut store = MemoryStore::new();
        store.add(&first).add(&second).remove_object(&first);
        let defaults = EntityDefaults::default();

        let expansion = DocumentExpander::new(Context::new(&store, &defaults))
            .expand(&doc)
            .unwrap();
        assert_eq!(expansion.references, vec![doc, second]);
        assert!(expansion.skipped.is_empty());
    }

    #[test]
    fn load_and_translation_failures_propagate() {
        let doc = setup();
        let defaults = EntityDefaults::default();

        let mut store = MemoryStore::new();
        store.add(&doc).fail_load(&doc);
        let err = DocumentExpander::new(Context::new(&store, &defaults))
            .expand(&doc)
            .unwrap_err();
        assert!(matches!(err, ResolveError::Lookup { source: StoreError::Backend(_), .. }));

        let mut store = MemoryStore::new();
        store.add(&doc).fail_translations(&doc);
        assert!(DocumentExpander::new(Context::new(&store, &defaults))
            .expand(&doc)
            .is_err());
    }

    #[test]
    fn identifier_carries_locale_suffix() {
        let store = MemoryStore::new();
        let defaults = EntityDefaults::default();
        let expander = DocumentExpander::new(Context::new(&store, &defaults));
        let doc = setup();

        assert_eq!(expander.identifier(&doc), "xwiki:Dev.Setup_");
        assert_eq!(
            expander.identifier(&doc.with_locale(Some(Locale::root())).unwrap()),
            "xwiki:Dev.Setup_"
        );
        assert_eq!(
            expander.identifier(&doc.with_locale(Some(locale("pt_BR"))).unwrap()),
            "xwiki:Dev.Setup_pt_BR"
        );
    }

    #[test]
    fn query_of_named_document() {
        let store = MemoryStore::new();
        let defaults = EntityDefaults::default();
        let query = DocumentExpander::new(Context::new(&store, &defaults))
            .query(&setup())
            .unwrap();
        assert_eq!(
            query.to_string(),
            "wiki:xwiki AND space_exact:Dev AND name_exact:Setup AND doc_final:true"
        );
    }

    #[test]
    fn query_of_home_page_shifts_up() {
        let store = MemoryStore::new();
        let defaults = EntityDefaults::default();
        let home = EntityReference::document("WebHome", setup().parent().unwrap()).unwrap();
        let query = DocumentExpander::new(Context::new(&store, &defaults))
            .query(&home)
            .unwrap();
        assert_eq!(
            query.to_string(),
            r#"wiki:xwiki AND space_exact:"" AND name_exact:Dev AND doc_final:false"#
        );
    }
}
