//! Conjunctive query fragments.

use std::{fmt, str::FromStr};

use crate::{Clause, QueryError, parser::parse};

/// The conjunction operator placed between clauses.
pub const AND: &str = " AND ";

/// A conjunction of exact-match clauses.
///
/// Fragments compose: the fragment of a child entity is its parent's fragment with more
/// clauses appended, so it selects a subset of the parent's records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryFragment {
    /// Clauses in the order they were added.
    clauses: Vec<Clause>,
}

impl QueryFragment {
    /// Creates an empty fragment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a `field:value` clause.
    pub fn clause(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.clauses.push(Clause::new(field, value));
        self
    }

    /// Appends every clause of `other`.
    pub fn and(mut self, other: Self) -> Self {
        self.clauses.extend(other.clauses);
        self
    }

    /// Returns the clauses.
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Returns the value required for `field`, if the fragment constrains it.
    pub fn value(&self, field: &str) -> Option<&str> {
        self.clauses
            .iter()
            .find(|c| c.field == field)
            .map(|c| c.value.as_str())
    }

    /// Returns true if the fragment has no clauses.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

impl From<Vec<Clause>> for QueryFragment {
    fn from(clauses: Vec<Clause>) -> Self {
        Self { clauses }
    }
}

impl fmt::Display for QueryFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, clause) in self.clauses.iter().enumerate() {
            if index > 0 {
                f.write_str(AND)?;
            }
            write!(f, "{clause}")?;
        }
        Ok(())
    }
}

impl FromStr for QueryFragment {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}
