//! Names of the fields an index record carries.
//!
//! Which fields are present is determined by the record's [`TYPE`].

/// Index identifier of the record.
pub const ID: &str = "id";

/// Kind marker (`WIKI`, `SPACE`, `DOCUMENT`, `ATTACHMENT`, `OBJECT`, `OBJECT_PROPERTY`).
pub const TYPE: &str = "type";

/// Wiki name.
pub const WIKI: &str = "wiki";

/// Local path of the space that holds the page; empty for a top-level space's home page.
pub const SPACE: &str = "space_exact";

/// Page name: the document name, or the space name for a space home page.
pub const NAME: &str = "name_exact";

/// True for an explicitly named document, false for a space home page.
pub const DOC_FINAL: &str = "doc_final";

/// Translation locale; absent for originals.
pub const LOCALE: &str = "locale";

/// Attachment file name.
pub const FILENAME: &str = "filename";

/// Object class name.
pub const CLASS: &str = "class";

/// Object number within its class.
pub const NUMBER: &str = "number";

/// Object property name.
pub const PROPERTY: &str = "property";

/// Text-valued fields.
pub const TEXT_FIELDS: &[&str] = &[
    ID, TYPE, WIKI, SPACE, NAME, LOCALE, FILENAME, CLASS, PROPERTY,
];
