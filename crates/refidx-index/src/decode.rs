//! Rebuilding references from index records.
//!
//! Decoding is the inverse of [`Resolver::record`](crate::Resolver::record): the flattened
//! space path is split back into nested spaces, the page name and `doc_final` flag undo
//! the home-page shift, and the kind-specific fields add the attachment, object or
//! property segment.

use std::str::FromStr;

use refidx_model::{
    EntityDefaults, EntityKind, EntityReference, Locale, ObjectName, resolve_str,
};
use tracing::debug;

use crate::{DecodeError, fields, record::IndexRecord};

/// Turns index records back into references.
#[derive(Clone, Copy)]
pub struct Decoder<'a> {
    /// Default segment names.
    defaults: &'a EntityDefaults,
}

impl<'a> Decoder<'a> {
    /// Creates a decoder.
    pub fn new(defaults: &'a EntityDefaults) -> Self {
        Self { defaults }
    }

    /// Decodes a record into a reference of the record's own kind.
    pub fn decode(&self, record: &IndexRecord) -> Result<EntityReference, DecodeError> {
        let kind = record_kind(record)?;
        self.decode_as(record, kind)
    }

    /// Decodes a record and expresses the result as a reference of `kind`.
    ///
    /// A shallower kind takes the matching ancestor; a deeper kind is completed with the
    /// default segment names.
    pub fn decode_as(
        &self,
        record: &IndexRecord,
        kind: EntityKind,
    ) -> Result<EntityReference, DecodeError> {
        let raw = self.decode_raw(record)?;
        let reference = self.normalize(raw, kind)?;
        debug!(%reference, "decoded record");
        Ok(reference)
    }

    /// Rebuilds the reference the record describes.
    fn decode_raw(&self, record: &IndexRecord) -> Result<EntityReference, DecodeError> {
        let kind = record_kind(record)?;

        let wiki = EntityReference::wiki(required_text(record, fields::WIKI)?)
            .map_err(|e| DecodeError::malformed(fields::WIKI, e))?;
        if kind == EntityKind::Wiki {
            return Ok(wiki);
        }

        let parent = match optional_text(record, fields::SPACE)? {
            Some(path) if !path.is_empty() => {
                resolve_str(path, EntityKind::Space, Some(&wiki), self.defaults)
                    .map_err(|e| DecodeError::malformed(fields::SPACE, e))?
            }
            _ => wiki,
        };
        let last = EntityReference::space(required_text(record, fields::NAME)?, &parent)
            .map_err(|e| DecodeError::malformed(fields::NAME, e))?;

        let is_final = match record.get(fields::DOC_FINAL) {
            None => false,
            Some(value) => value
                .as_bool()
                .ok_or_else(|| DecodeError::malformed(fields::DOC_FINAL, "expected a boolean"))?,
        };
        let document = if is_final {
            EntityReference::document(last.name(), &parent)
        } else {
            EntityReference::document(self.defaults.document.as_str(), &last)
        }
        .map_err(|e| DecodeError::malformed(fields::NAME, e))?;

        let document = match optional_text(record, fields::LOCALE)? {
            Some(tag) if !tag.is_empty() => {
                let locale = Locale::parse(tag)
                    .map_err(|e| DecodeError::malformed(fields::LOCALE, e))?;
                document
                    .with_locale(Some(locale))
                    .map_err(|e| DecodeError::malformed(fields::LOCALE, e))?
            }
            _ => document,
        };

        match kind {
            EntityKind::Attachment => {
                EntityReference::attachment(required_text(record, fields::FILENAME)?, &document)
                    .map_err(|e| DecodeError::malformed(fields::FILENAME, e))
            }
            EntityKind::Object => object(record, &document),
            EntityKind::ObjectProperty => {
                let object = object(record, &document)?;
                EntityReference::object_property(required_text(record, fields::PROPERTY)?, &object)
                    .map_err(|e| DecodeError::malformed(fields::PROPERTY, e))
            }
            EntityKind::Wiki | EntityKind::Space | EntityKind::Document => Ok(document),
        }
    }

    /// Expresses `reference` as a reference of `kind`.
    fn normalize(
        &self,
        reference: EntityReference,
        kind: EntityKind,
    ) -> Result<EntityReference, DecodeError> {
        if reference.kind() == kind {
            return Ok(reference);
        }
        if let Some(ancestor) = reference.extract(kind) {
            return Ok(ancestor.clone());
        }
        resolve_str("", kind, Some(&reference), self.defaults).map_err(|source| {
            DecodeError::Normalize {
                reference,
                kind,
                source,
            }
        })
    }
}

/// Reads the record's kind marker.
fn record_kind(record: &IndexRecord) -> Result<EntityKind, DecodeError> {
    let marker = record.get_str(fields::TYPE).ok_or(DecodeError::MissingKind)?;
    EntityKind::from_str(marker).map_err(|_| DecodeError::UnsupportedKind(marker.to_string()))
}

/// Builds the object segment from the class and number fields.
fn object(record: &IndexRecord, document: &EntityReference) -> Result<EntityReference, DecodeError> {
    let class = required_text(record, fields::CLASS)?;
    let number = record
        .get(fields::NUMBER)
        .ok_or_else(|| DecodeError::malformed(fields::NUMBER, "missing"))?
        .as_u64()
        .ok_or_else(|| DecodeError::malformed(fields::NUMBER, "expected a number"))?;
    let number = u32::try_from(number).map_err(|e| DecodeError::malformed(fields::NUMBER, e))?;

    EntityReference::object(ObjectName::new(class, number).to_string(), document)
        .map_err(|e| DecodeError::malformed(fields::CLASS, e))
}

/// Reads a text field that must be present.
fn required_text<'r>(record: &'r IndexRecord, field: &'static str) -> Result<&'r str, DecodeError> {
    optional_text(record, field)?.ok_or_else(|| DecodeError::malformed(field, "missing"))
}

/// Reads a text field that may be absent but must be text when present.
fn optional_text<'r>(
    record: &'r IndexRecord,
    field: &'static str,
) -> Result<Option<&'r str>, DecodeError> {
    match record.get(field) {
        None => Ok(None),
        Some(value) => value
            .as_str()
            .map(Some)
            .ok_or_else(|| DecodeError::malformed(field, "expected text")),
    }
}
