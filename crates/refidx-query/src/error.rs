//! Errors raised while reading a fragment back from text.
//!
//! A fragment that fails to parse is reported with the fragment itself and a caret under
//! the offending byte, since fragments are usually long `AND` chains produced by code.

use std::{error::Error as StdError, fmt};

use thiserror::Error;

/// Writes `message`, then `fragment` with a caret under byte `position`.
fn write_pointer(
    f: &mut fmt::Formatter<'_>,
    message: &str,
    fragment: &str,
    position: Option<usize>,
) -> fmt::Result {
    write!(f, "invalid fragment: {message}\n  {fragment}")?;
    if let Some(position) = position {
        let column = fragment
            .get(..position.min(fragment.len()))
            .map_or(position, |prefix| prefix.chars().count());
        write!(f, "\n  {:>width$}", "^", width = column + 1)?;
    }
    Ok(())
}

/// A character sequence the tokenizer cannot read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    /// What went wrong.
    pub message: String,
    /// Byte offset of the problem.
    pub position: usize,
    /// The fragment being tokenized.
    pub input: String,
}

impl LexError {
    /// Creates a tokenizer error at `position` in `input`.
    pub fn new(message: impl Into<String>, position: usize, input: &str) -> Self {
        Self {
            message: message.into(),
            position,
            input: input.to_string(),
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_pointer(f, &self.message, &self.input, Some(self.position))
    }
}

impl StdError for LexError {}

/// Tokens that do not form `field:value (AND field:value)*`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ParseError {
    /// What went wrong.
    pub message: String,
    /// Byte offset of the offending token; `None` when the fragment ended early.
    pub position: Option<usize>,
}

impl ParseError {
    /// Creates a parse error.
    pub fn new(message: impl Into<String>, position: Option<usize>) -> Self {
        Self {
            message: message.into(),
            position,
        }
    }
}

/// Which stage rejected a fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryErrorKind {
    /// An unreadable character sequence: unclosed phrase, dangling escape, grouping.
    Lex,
    /// A missing field prefix, value or `AND`.
    Parse,
}

/// Failure to read a fragment, returned by [`parse`](crate::parse).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryError {
    /// Stage that failed.
    pub kind: QueryErrorKind,
    /// What went wrong.
    pub message: String,
    /// Byte offset of the problem, if the fragment did not simply end early.
    pub position: Option<usize>,
    /// The rejected fragment, when known.
    pub fragment: Option<String>,
}

impl QueryError {
    /// Attaches the rejected fragment.
    pub fn with_fragment(mut self, fragment: impl Into<String>) -> Self {
        self.fragment = Some(fragment.into());
        self
    }

    /// Returns the message without the fragment or pointer.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the byte offset of the problem.
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    /// Suggests a fix for mistakes made when writing fragments by hand.
    pub fn hint(&self) -> Option<&'static str> {
        match self.kind {
            QueryErrorKind::Lex if self.message.contains("unclosed") => {
                Some("close the phrase with '\"'")
            }
            QueryErrorKind::Lex if self.message.contains("grouping") => {
                Some("fragments are flat; escape '(' and ')' inside values")
            }
            QueryErrorKind::Parse if self.message.contains("expected value") => {
                Some("escape ':', spaces and quotes in values with escape_query_chars")
            }
            QueryErrorKind::Parse if self.message.contains("expected AND") => {
                Some("join clauses with AND, e.g. 'wiki:xwiki AND doc_final:true'")
            }
            QueryErrorKind::Lex | QueryErrorKind::Parse => None,
        }
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.fragment {
            Some(fragment) => write_pointer(f, &self.message, fragment, self.position)?,
            None => write!(f, "invalid fragment: {}", self.message)?,
        }
        if let Some(hint) = self.hint() {
            write!(f, "\nhint: {hint}")?;
        }
        Ok(())
    }
}

impl StdError for QueryError {}

impl From<LexError> for QueryError {
    fn from(err: LexError) -> Self {
        Self {
            kind: QueryErrorKind::Lex,
            message: err.message,
            position: Some(err.position),
            fragment: Some(err.input),
        }
    }
}

impl From<ParseError> for QueryError {
    fn from(err: ParseError) -> Self {
        Self {
            kind: QueryErrorKind::Parse,
            message: err.message,
            position: err.position,
            fragment: None,
        }
    }
}
