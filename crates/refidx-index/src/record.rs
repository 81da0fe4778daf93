//! Flat index records.
//!
//! An [`IndexRecord`] is the field set an indexer writes for one entity, and the field set
//! a search result hands back. Records convert to and from Tantivy documents and can be
//! read from the JSON documents a search engine returns.

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};
use tantivy::{TantivyDocument, schema::Value};

use crate::{DecodeError, IndexSchema, fields};

/// A single field value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Boolean value, used by `doc_final`.
    Bool(bool),
    /// Unsigned number, used by `number`.
    Number(u64),
    /// Text value.
    Text(String),
}

impl FieldValue {
    /// Returns the text, if this is a text value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Bool(_) | Self::Number(_) => None,
        }
    }

    /// Returns the boolean, accepting the text forms `true` and `false`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            Self::Text(text) => text.parse().ok(),
            Self::Number(_) => None,
        }
    }

    /// Returns the number, accepting its decimal text form.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(text) => text.parse().ok(),
            Self::Bool(_) => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        Self::Number(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        Self::Number(u64::from(value))
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// A flat mapping of field name to value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndexRecord {
    /// Field values keyed by field name.
    fields: BTreeMap<String, FieldValue>,
}

impl IndexRecord {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the record with `field` set to `value`.
    pub fn with(mut self, field: &str, value: impl Into<FieldValue>) -> Self {
        self.insert(field, value);
        self
    }

    /// Sets `field` to `value`, replacing any previous value.
    pub fn insert(&mut self, field: &str, value: impl Into<FieldValue>) {
        self.fields.insert(field.to_string(), value.into());
    }

    /// Returns the value of `field`.
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// Returns the text value of `field`.
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(FieldValue::as_str)
    }

    /// Returns the boolean value of `field`.
    pub fn get_bool(&self, field: &str) -> Option<bool> {
        self.get(field).and_then(FieldValue::as_bool)
    }

    /// Returns the numeric value of `field`.
    pub fn get_u64(&self, field: &str) -> Option<u64> {
        self.get(field).and_then(FieldValue::as_u64)
    }

    /// Iterates over the fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Parses a record from a JSON object such as a search-engine result document.
    ///
    /// Booleans, unsigned integers and strings become field values. For an array the first
    /// such element is taken, as engines return multi-valued fields that way. Values of
    /// any other shape (scores, versions, nested objects) are dropped.
    pub fn from_json(json: &str) -> Result<Self, DecodeError> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| DecodeError::Json(e.to_string()))?;
        let serde_json::Value::Object(map) = value else {
            return Err(DecodeError::Json(String::from("expected an object")));
        };

        let mut record = Self::new();
        for (name, value) in &map {
            if let Some(value) = json_field_value(value) {
                record.insert(name, value);
            }
        }
        Ok(record)
    }

    /// Renders the record as a JSON object.
    pub fn to_json(&self) -> String {
        serde_json::Value::from(self).to_string()
    }

    /// Converts the record into a Tantivy document.
    ///
    /// Fields the schema does not declare are skipped, and so are values whose type does
    /// not match the declared field type.
    pub fn to_document(&self, schema: &IndexSchema) -> TantivyDocument {
        let mut doc = TantivyDocument::new();

        for (name, value) in self.iter() {
            let Some(field) = schema.field(name) else {
                continue;
            };
            match name {
                fields::DOC_FINAL => {
                    if let Some(flag) = value.as_bool() {
                        doc.add_bool(field, flag);
                    }
                }
                fields::NUMBER => {
                    if let Some(number) = value.as_u64() {
                        doc.add_u64(field, number);
                    }
                }
                _ => {
                    if let Some(text) = value.as_str() {
                        doc.add_text(field, text);
                    }
                }
            }
        }

        doc
    }

    /// Reads a record back from a stored Tantivy document.
    pub fn from_document(doc: &TantivyDocument, schema: &IndexSchema) -> Self {
        let mut record = Self::new();

        for &name in fields::TEXT_FIELDS {
            if let Some(field) = schema.field(name)
                && let Some(text) = doc.get_first(field).and_then(|v| v.as_str())
            {
                record.insert(name, text);
            }
        }
        if let Some(flag) = doc.get_first(schema.doc_final).and_then(|v| v.as_bool()) {
            record.insert(fields::DOC_FINAL, flag);
        }
        if let Some(number) = doc.get_first(schema.number).and_then(|v| v.as_u64()) {
            record.insert(fields::NUMBER, number);
        }

        record
    }
}

/// Converts one JSON value into a field value, if it has a supported shape.
fn json_field_value(value: &serde_json::Value) -> Option<FieldValue> {
    match value {
        serde_json::Value::Bool(flag) => Some(FieldValue::Bool(*flag)),
        serde_json::Value::Number(number) => number.as_u64().map(FieldValue::Number),
        serde_json::Value::String(text) => Some(FieldValue::Text(text.clone())),
        serde_json::Value::Array(items) => items.iter().find_map(json_field_value),
        serde_json::Value::Null | serde_json::Value::Object(_) => None,
    }
}

impl From<&IndexRecord> for serde_json::Value {
    fn from(record: &IndexRecord) -> Self {
        record
            .iter()
            .map(|(name, value)| {
                let value = match value {
                    FieldValue::Bool(flag) => Self::from(*flag),
                    FieldValue::Number(number) => Self::from(*number),
                    FieldValue::Text(text) => Self::from(text.as_str()),
                };
                (name.to_string(), value)
            })
            .collect::<serde_json::Map<_, _>>()
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attachment_record() -> IndexRecord {
        IndexRecord::new()
            .with(fields::ID, "xwiki:Dev.Setup@notes.txt")
            .with(fields::TYPE, "ATTACHMENT")
            .with(fields::WIKI, "xwiki")
            .with(fields::SPACE, "Dev")
            .with(fields::NAME, "Setup")
            .with(fields::DOC_FINAL, true)
            .with(fields::FILENAME, "notes.txt")
    }

    #[test]
    fn typed_accessors() {
        let record = attachment_record().with(fields::NUMBER, 3u32);
        assert_eq!(record.get_str(fields::WIKI), Some("xwiki"));
        assert_eq!(record.get_bool(fields::DOC_FINAL), Some(true));
        assert_eq!(record.get_u64(fields::NUMBER), Some(3));
        assert_eq!(record.get_str(fields::DOC_FINAL), None);
        assert_eq!(record.get(fields::LOCALE), None);
    }

    #[test]
    fn text_forms_of_bool_and_number() {
        let record = IndexRecord::new()
            .with(fields::DOC_FINAL, "false")
            .with(fields::NUMBER, "12");
        assert_eq!(record.get_bool(fields::DOC_FINAL), Some(false));
        assert_eq!(record.get_u64(fields::NUMBER), Some(12));
    }

    #[test]
    fn from_json_reads_typed_values() {
        let record = IndexRecord::from_json(
            r#"{"type": "OBJECT", "wiki": ["xwiki"], "doc_final": true, "number": 0,
                "score": 1.5, "_version_": -1, "meta": {"a": 1}}"#,
        )
        .unwrap();
        assert_eq!(record.get_str(fields::TYPE), Some("OBJECT"));
        assert_eq!(record.get_str(fields::WIKI), Some("xwiki"));
        assert_eq!(record.get(fields::DOC_FINAL), Some(&FieldValue::Bool(true)));
        assert_eq!(record.get(fields::NUMBER), Some(&FieldValue::Number(0)));
        assert_eq!(record.len(), 4);
    }

    #[test]
    fn from_json_rejects_non_objects() {
        assert!(matches!(
            IndexRecord::from_json("[1, 2]"),
            Err(DecodeError::Json(_))
        ));
        assert!(matches!(
            IndexRecord::from_json("{"),
            Err(DecodeError::Json(_))
        ));
    }

    #[test]
    fn serializes_as_flat_object() {
        let record = IndexRecord::new()
            .with(fields::WIKI, "xwiki")
            .with(fields::DOC_FINAL, false);
        assert_eq!(
            serde_json::to_string(&record).unwrap(),
            r#"{"doc_final":false,"wiki":"xwiki"}"#
        );
    }

    #[test]
    fn json_output_parses_back() {
        let record = attachment_record();
        assert_eq!(IndexRecord::from_json(&record.to_json()).unwrap(), record);
    }

    #[test]
    fn tantivy_document_round_trip() {
        let schema = IndexSchema::new();
        let record = attachment_record().with("unknown", "dropped");

        let doc = record.to_document(&schema);
        let back = IndexRecord::from_document(&doc, &schema);

        assert_eq!(back.get(fields::DOC_FINAL), Some(&FieldValue::Bool(true)));
        assert_eq!(back.get_str(fields::FILENAME), Some("notes.txt"));
        assert_eq!(back.get("unknown"), None);
        assert_eq!(back.len(), record.len() - 1);
    }
}
