//! Query clauses.

use std::fmt;

use crate::escape::escape_query_chars;

/// An exact-match clause: `field` must hold exactly `value`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Clause {
    /// Index field name.
    pub field: String,
    /// Unescaped value.
    pub value: String,
}

impl Clause {
    /// Creates a clause.
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.value.is_empty() {
            write!(f, "{}:\"\"", self.field)
        } else {
            write!(f, "{}:{}", self.field, escape_query_chars(&self.value))
        }
    }
}
