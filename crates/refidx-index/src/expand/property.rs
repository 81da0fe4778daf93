//! Object property expansion.

use refidx_model::EntityReference;
use refidx_query::QueryFragment;

use super::{Context, Expansion, ObjectExpander, ReferenceExpander};
use crate::{ResolveError, fields};

/// Expands an object property into its own record.
#[derive(Clone, Copy)]
pub struct PropertyExpander<'a> {
    /// Shared collaborators.
    cx: Context<'a>,
}

impl<'a> PropertyExpander<'a> {
    /// Creates the expander.
    pub fn new(cx: Context<'a>) -> Self {
        Self { cx }
    }
}

impl ReferenceExpander for PropertyExpander<'_> {
    fn expand(&self, reference: &EntityReference) -> Result<Expansion, ResolveError> {
        let mut expansion = Expansion::new();
        if self.cx.exists(reference)? {
            expansion.push(reference.clone());
        }
        Ok(expansion)
    }

    fn query(&self, reference: &EntityReference) -> Result<QueryFragment, ResolveError> {
        let object = ObjectExpander::new(self.cx).query(reference)?;
        Ok(object.clause(fields::PROPERTY, reference.name()))
    }
}
