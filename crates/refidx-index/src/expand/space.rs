//! Space expansion.

use refidx_model::{EntityKind, EntityReference};
use refidx_query::QueryFragment;

use super::{Context, DocumentExpander, Expansion, ReferenceExpander, WikiExpander};
use crate::{ResolveError, fields, location::space_path};

/// Expands a space into the records of its documents and nested spaces.
///
/// The space itself has no record of its own; its home page is one of its documents.
#[derive(Clone, Copy)]
pub struct SpaceExpander<'a> {
    /// Shared collaborators.
    cx: Context<'a>,
}

impl<'a> SpaceExpander<'a> {
    /// Creates the expander.
    pub fn new(cx: Context<'a>) -> Self {
        Self { cx }
    }
}

impl ReferenceExpander for SpaceExpander<'_> {
    fn expand(&self, reference: &EntityReference) -> Result<Expansion, ResolveError> {
        let mut expansion = Expansion::new();
        if !self.cx.exists(reference)? {
            return Ok(expansion);
        }

        let documents = DocumentExpander::new(self.cx);
        for document in self.cx.children(reference, EntityKind::Document)? {
            expansion.absorb(&document, documents.expand(&document));
        }
        for space in self.cx.children(reference, EntityKind::Space)? {
            expansion.absorb(&space, self.expand(&space));
        }

        Ok(expansion)
    }

    /// Selects the pages held directly by the space.
    ///
    /// Also accepts a wiki reference, which selects the pages held by no space: the home
    /// pages of the top-level spaces.
    fn query(&self, reference: &EntityReference) -> Result<QueryFragment, ResolveError> {
        let wiki = WikiExpander::new(self.cx).query(reference)?;
        Ok(wiki.clause(fields::SPACE, space_path(reference)))
    }
}
