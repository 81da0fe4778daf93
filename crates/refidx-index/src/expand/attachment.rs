//! Attachment expansion.

use refidx_model::EntityReference;
use refidx_query::QueryFragment;

use super::{Context, DocumentExpander, Expansion, ReferenceExpander};
use crate::{ResolveError, fields};

/// Expands an attachment into its own record.
#[derive(Clone, Copy)]
pub struct AttachmentExpander<'a> {
    /// Shared collaborators.
    cx: Context<'a>,
}

impl<'a> AttachmentExpander<'a> {
    /// Creates the expander.
    pub fn new(cx: Context<'a>) -> Self {
        Self { cx }
    }
}

impl ReferenceExpander for AttachmentExpander<'_> {
    fn expand(&self, reference: &EntityReference) -> Result<Expansion, ResolveError> {
        let mut expansion = Expansion::new();
        if self.cx.exists(reference)? {
            expansion.push(reference.clone());
        }
        Ok(expansion)
    }

    fn query(&self, reference: &EntityReference) -> Result<QueryFragment, ResolveError> {
        let document = DocumentExpander::new(self.cx).query(reference)?;
        Ok(document.clause(fields::FILENAME, reference.name()))
    }
}

#[cfg(test)]
mod tests {
    use refidx_model::EntityDefaults;

    use super::*;
    use crate::MemoryStore;

    fn logo() -> EntityReference {
        let wiki = EntityReference::wiki("xwiki").unwrap();
        let space = EntityReference::space("Main", &wiki).unwrap();
        let home = EntityReference::document("WebHome", &space).unwrap();
        EntityReference::attachment("logo v2.png", &home).unwrap()
    }

    #[test]
    fn expands_to_itself_when_present() {
        let mut store = MemoryStore::new();
        let defaults = EntityDefaults::default();
        assert!(AttachmentExpander::new(Context::new(&store, &defaults))
            .expand(&logo())
            .unwrap()
            .is_empty());

        store.add(&logo());
        let expansion = AttachmentExpander::new(Context::new(&store, &defaults))
            .expand(&logo())
            .unwrap();
        assert_eq!(expansion.references, vec![logo()]);
    }

    #[test]
    fn query_extends_the_document_query() {
        let store = MemoryStore::new();
        let defaults = EntityDefaults::default();
        let query = AttachmentExpander::new(Context::new(&store, &defaults))
            .query(&logo())
            .unwrap();
        assert_eq!(
            query.to_string(),
            r#"wiki:xwiki AND space_exact:"" AND name_exact:Main AND doc_final:false AND filename:logo\ v2.png"#
        );
    }
}
