//! Object expansion.

use refidx_model::{EntityKind, EntityReference, ObjectName, ReferenceError};
use refidx_query::QueryFragment;

use super::{Context, DocumentExpander, Expansion, PropertyExpander, ReferenceExpander};
use crate::{ResolveError, fields, record::IndexRecord};

/// Expands an object into itself and its properties.
#[derive(Clone, Copy)]
pub struct ObjectExpander<'a> {
    /// Shared collaborators.
    cx: Context<'a>,
}

impl<'a> ObjectExpander<'a> {
    /// Creates the expander.
    pub fn new(cx: Context<'a>) -> Self {
        Self { cx }
    }
}

impl ReferenceExpander for ObjectExpander<'_> {
    fn expand(&self, reference: &EntityReference) -> Result<Expansion, ResolveError> {
        let mut expansion = Expansion::new();
        if !self.cx.exists(reference)? {
            return Ok(expansion);
        }
        expansion.push(reference.clone());

        let properties = PropertyExpander::new(self.cx);
        for property in self.cx.children(reference, EntityKind::ObjectProperty)? {
            expansion.absorb(&property, properties.expand(&property));
        }

        Ok(expansion)
    }

    /// Extends the document query with the object's class and number.
    ///
    /// Accepts the object itself or one of its properties.
    fn query(&self, reference: &EntityReference) -> Result<QueryFragment, ResolveError> {
        let name = object_name(reference)?;
        let document = DocumentExpander::new(self.cx).query(reference)?;
        Ok(document
            .clause(fields::CLASS, name.class)
            .clause(fields::NUMBER, name.number.to_string()))
    }
}

/// Splits the name of the nearest object of `reference` into class and number.
fn object_name(reference: &EntityReference) -> Result<ObjectName, ReferenceError> {
    let object = reference
        .extract(EntityKind::Object)
        .ok_or(ReferenceError::MissingParent {
            kind: reference.kind(),
        })?;
    ObjectName::parse(object.name())
}

/// Writes the class and number fields of `object` into `record`.
pub(super) fn insert_fields(
    record: &mut IndexRecord,
    object: &EntityReference,
) -> Result<(), ReferenceError> {
    let name = object_name(object)?;
    record.insert(fields::CLASS, name.class);
    record.insert(fields::NUMBER, name.number);
    Ok(())
}
