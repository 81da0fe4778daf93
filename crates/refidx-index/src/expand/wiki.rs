//! Wiki expansion.

use refidx_model::{EntityKind, EntityReference};
use refidx_query::QueryFragment;

use super::{Context, Expansion, ReferenceExpander, SpaceExpander};
use crate::{ResolveError, fields};

/// Expands a wiki into the records of its top-level spaces.
#[derive(Clone, Copy)]
pub struct WikiExpander<'a> {
    /// Shared collaborators.
    cx: Context<'a>,
}

impl<'a> WikiExpander<'a> {
    /// Creates the expander.
    pub fn new(cx: Context<'a>) -> Self {
        Self { cx }
    }
}

impl ReferenceExpander for WikiExpander<'_> {
    fn expand(&self, reference: &EntityReference) -> Result<Expansion, ResolveError> {
        let mut expansion = Expansion::new();
        if !self.cx.exists(reference)? {
            return Ok(expansion);
        }

        let spaces = SpaceExpander::new(self.cx);
        for space in self.cx.children(reference, EntityKind::Space)? {
            expansion.absorb(&space, spaces.expand(&space));
        }

        Ok(expansion)
    }

    fn query(&self, reference: &EntityReference) -> Result<QueryFragment, ResolveError> {
        let wiki = reference
            .extract(EntityKind::Wiki)
            .unwrap_or(reference);
        Ok(QueryFragment::new().clause(fields::WIKI, wiki.name()))
    }
}

#[cfg(test)]
mod tests {
    use refidx_model::EntityDefaults;

    use super::*;
    use crate::{MemoryStore, StoreError};

    #[test]
    fn expands_every_top_level_space() {
        let wiki = EntityReference::wiki("xwiki").unwrap();
        let dev = EntityReference::space("Dev", &wiki).unwrap();
        let main = EntityReference::space("Main", &wiki).unwrap();
        let setup = EntityReference::document("Setup", &dev).unwrap();
        let home = EntityReference::document("WebHome", &main).unwrap();

        let mut store = MemoryStore::new();
        store.add(&setup).add(&home);
        let defaults = EntityDefaults::default();

        let expansion = WikiExpander::new(Context::new(&store, &defaults))
            .expand(&wiki)
            .unwrap();
        assert_eq!(expansion.references, vec![setup, home]);
    }

    #[test]
    fn failing_space_is_skipped() {
        let wiki = EntityReference::wiki("xwiki").unwrap();
        let dev = EntityReference::space("Dev", &wiki).unwrap();
        let main = EntityReference::space("Main", &wiki).unwrap();
        let home = EntityReference::document("WebHome", &main).unwrap();

        let mut store = MemoryStore::new();
        store.add(&dev).add(&home).fail_on(&dev);
        let defaults = EntityDefaults::default();

        let expansion = WikiExpander::new(Context::new(&store, &defaults))
            .expand(&wiki)
            .unwrap();
        assert_eq!(expansion.references, vec![home]);
        assert_eq!(expansion.skipped.len(), 1);
        assert_eq!(expansion.skipped[0].reference, dev);
        assert!(matches!(
            &expansion.skipped[0].error,
            ResolveError::Lookup { source: StoreError::Backend(_), .. }
        ));
    }

    #[test]
    fn query_selects_the_wiki() {
        let store = MemoryStore::new();
        let defaults = EntityDefaults::default();
        let wiki = EntityReference::wiki("dev wiki").unwrap();

        let query = WikiExpander::new(Context::new(&store, &defaults))
            .query(&wiki)
            .unwrap();
        assert_eq!(query.to_string(), r"wiki:dev\ wiki");
    }
}
