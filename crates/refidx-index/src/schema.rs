//! Index schema definition for refidx records.
//!
//! Defines the Tantivy schema with one field per record field:
//! - text fields (`id`, `type`, `wiki`, `space_exact`, `name_exact`, `locale`, `filename`,
//!   `class`, `property`): single untokenized term, stored; `type` is also fast
//! - `doc_final`: boolean, indexed and stored
//! - `number`: unsigned integer, indexed and stored
//!
//! Every field is matched exactly, so a [`QueryFragment`] compiles to a conjunction of
//! term queries.

use refidx_query::QueryFragment;
use tantivy::{
    Term,
    query::{AllQuery, BooleanQuery, Occur, Query, TermQuery},
    schema::{FAST, Field, INDEXED, IndexRecordOption, STORED, STRING, Schema},
};

use crate::{IndexError, fields};

/// Handles to all fields in the index schema.
#[derive(Debug, Clone)]
pub struct IndexSchema {
    /// The underlying Tantivy schema.
    schema: Schema,
    /// Index identifier.
    pub id: Field,
    /// Kind marker.
    pub kind: Field,
    /// Wiki name.
    pub wiki: Field,
    /// Local path of the page's parent space.
    pub space: Field,
    /// Page name.
    pub name: Field,
    /// Explicitly named document flag.
    pub doc_final: Field,
    /// Translation locale.
    pub locale: Field,
    /// Attachment file name.
    pub filename: Field,
    /// Object class.
    pub class: Field,
    /// Object number.
    pub number: Field,
    /// Object property name.
    pub property: Field,
}

impl IndexSchema {
    /// Creates a new index schema with all fields configured.
    pub fn new() -> Self {
        let mut builder = Schema::builder();

        let id = builder.add_text_field(fields::ID, STRING | STORED);
        // Kind is fast for per-kind counting and filtering.
        let kind = builder.add_text_field(fields::TYPE, STRING | STORED | FAST);
        let wiki = builder.add_text_field(fields::WIKI, STRING | STORED);
        let space = builder.add_text_field(fields::SPACE, STRING | STORED);
        let name = builder.add_text_field(fields::NAME, STRING | STORED);
        let doc_final = builder.add_bool_field(fields::DOC_FINAL, INDEXED | STORED);
        let locale = builder.add_text_field(fields::LOCALE, STRING | STORED);
        let filename = builder.add_text_field(fields::FILENAME, STRING | STORED);
        let class = builder.add_text_field(fields::CLASS, STRING | STORED);
        let number = builder.add_u64_field(fields::NUMBER, INDEXED | STORED);
        let property = builder.add_text_field(fields::PROPERTY, STRING | STORED);

        Self {
            schema: builder.build(),
            id,
            kind,
            wiki,
            space,
            name,
            doc_final,
            locale,
            filename,
            class,
            number,
            property,
        }
    }

    /// Returns a reference to the underlying Tantivy schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Returns the handle of the field called `name`.
    pub fn field(&self, name: &str) -> Option<Field> {
        let field = match name {
            fields::ID => self.id,
            fields::TYPE => self.kind,
            fields::WIKI => self.wiki,
            fields::SPACE => self.space,
            fields::NAME => self.name,
            fields::DOC_FINAL => self.doc_final,
            fields::LOCALE => self.locale,
            fields::FILENAME => self.filename,
            fields::CLASS => self.class,
            fields::NUMBER => self.number,
            fields::PROPERTY => self.property,
            _ => return None,
        };
        Some(field)
    }

    /// Compiles a fragment into a Tantivy query.
    ///
    /// Each clause becomes an exact term query and all of them must match. An empty
    /// fragment matches every record.
    pub fn compile(&self, fragment: &QueryFragment) -> Result<Box<dyn Query>, IndexError> {
        if fragment.is_empty() {
            return Ok(Box::new(AllQuery));
        }

        let clauses = fragment
            .clauses()
            .iter()
            .map(|clause| {
                let term = self.term(&clause.field, &clause.value)?;
                let query: Box<dyn Query> =
                    Box::new(TermQuery::new(term, IndexRecordOption::Basic));
                Ok((Occur::Must, query))
            })
            .collect::<Result<Vec<_>, IndexError>>()?;

        Ok(Box::new(BooleanQuery::new(clauses)))
    }

    /// Builds the term a clause on `field` must match.
    fn term(&self, field: &str, value: &str) -> Result<Term, IndexError> {
        let handle = self
            .field(field)
            .ok_or_else(|| IndexError::UnknownField(field.to_string()))?;
        let invalid = || IndexError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
        };

        match field {
            fields::DOC_FINAL => {
                let flag: bool = value.parse().map_err(|_| invalid())?;
                Ok(Term::from_field_bool(handle, flag))
            }
            fields::NUMBER => {
                let number: u64 = value.parse().map_err(|_| invalid())?;
                Ok(Term::from_field_u64(handle, number))
            }
            _ => Ok(Term::from_field_text(handle, value)),
        }
    }
}

impl Default for IndexSchema {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declares_every_record_field() {
        let schema = IndexSchema::new();
        for &name in fields::TEXT_FIELDS {
            let field = schema.field(name).unwrap();
            assert_eq!(schema.schema().get_field_name(field), name);
        }
        assert_eq!(
            schema.schema().get_field_name(schema.doc_final),
            fields::DOC_FINAL
        );
        assert_eq!(schema.schema().get_field_name(schema.number), fields::NUMBER);
        assert!(schema.field("title").is_none());
    }

    #[test]
    fn compile_rejects_unknown_fields() {
        let fragment = QueryFragment::new().clause("title", "x");
        let err = IndexSchema::new().compile(&fragment).unwrap_err();
        assert!(matches!(err, IndexError::UnknownField(f) if f == "title"));
    }

    #[test]
    fn compile_rejects_mistyped_values() {
        let schema = IndexSchema::new();
        let fragment = QueryFragment::new().clause(fields::DOC_FINAL, "yes");
        assert!(matches!(
            schema.compile(&fragment),
            Err(IndexError::InvalidValue { .. })
        ));
        let fragment = QueryFragment::new().clause(fields::NUMBER, "-1");
        assert!(matches!(
            schema.compile(&fragment),
            Err(IndexError::InvalidValue { .. })
        ));
    }

    #[test]
    fn compile_accepts_typed_values() {
        let fragment = QueryFragment::new()
            .clause(fields::WIKI, "xwiki")
            .clause(fields::DOC_FINAL, "true")
            .clause(fields::NUMBER, "2");
        assert!(IndexSchema::new().compile(&fragment).is_ok());
        assert!(IndexSchema::new().compile(&QueryFragment::new()).is_ok());
    }
}
