//! Fragment parser.
//!
//! Parses a token stream into a [`QueryFragment`] using recursive descent.
//!
//! # Grammar
//!
//! ```text
//! fragment → clause ("AND" clause)*
//! clause   → FIELD_PREFIX (TERM | PHRASE)
//! ```
//!
//! An empty input parses to an empty fragment.

use crate::{
    Clause, QueryFragment,
    error::{ParseError, QueryError},
    lexer::{Spanned, Token, tokenize},
};

/// The conjunction keyword.
const AND_KEYWORD: &str = "AND";

/// Recursive descent parser for fragments.
struct Parser {
    /// Token stream to parse.
    tokens: Vec<Spanned>,
    /// Current position in token stream.
    position: usize,
}

impl Parser {
    /// Creates a new parser from a token stream.
    fn new(tokens: Vec<Spanned>) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    /// Parses the token stream into a fragment.
    fn parse(mut self) -> Result<QueryFragment, ParseError> {
        let mut clauses = Vec::new();
        if self.tokens.is_empty() {
            return Ok(QueryFragment::new());
        }

        clauses.push(self.parse_clause()?);

        while let Some(spanned) = self.peek() {
            let position = spanned.position;
            if !matches!(&spanned.token, Token::Term(word) if word == AND_KEYWORD) {
                return Err(ParseError::new(
                    "expected AND between clauses",
                    Some(position),
                ));
            }
            self.advance(); // consume AND
            clauses.push(self.parse_clause()?);
        }

        Ok(QueryFragment::from(clauses))
    }

    /// Parses: clause → FIELD_PREFIX (TERM | PHRASE)
    fn parse_clause(&mut self) -> Result<Clause, ParseError> {
        let (field, field_position) = match self.peek() {
            Some(Spanned {
                token: Token::FieldPrefix(field),
                position,
            }) => (field.clone(), *position),
            Some(Spanned { position, .. }) => {
                return Err(ParseError::new("expected field prefix", Some(*position)));
            }
            None => return Err(ParseError::new("expected field prefix", None)),
        };
        self.advance();

        let value = match self.peek() {
            Some(Spanned {
                token: Token::Term(value) | Token::Phrase(value),
                ..
            }) => value.clone(),
            Some(Spanned { position, .. }) => {
                return Err(ParseError::new(
                    format!("expected value after '{field}:'"),
                    Some(*position),
                ));
            }
            None => {
                return Err(ParseError::new(
                    format!("expected value after '{field}:'"),
                    Some(field_position + field.len() + 1),
                ));
            }
        };
        self.advance();

        Ok(Clause::new(field, value))
    }

    /// Returns the current token without consuming it.
    fn peek(&self) -> Option<&Spanned> {
        self.tokens.get(self.position)
    }

    /// Advances to the next token.
    fn advance(&mut self) {
        if self.position < self.tokens.len() {
            self.position += 1;
        }
    }
}

/// Parses a fragment string.
///
/// Escaped characters in values are resolved, so `name_exact:a\:b` yields a single clause
/// whose value is `a:b`.
pub fn parse(input: &str) -> Result<QueryFragment, QueryError> {
    let tokens = tokenize(input)?;
    Parser::new(tokens)
        .parse()
        .map_err(|err| QueryError::from(err).with_fragment(input))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_empty_fragment() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("  ").unwrap().is_empty());
    }

    #[test]
    fn single_clause() {
        let fragment = parse("wiki:xwiki").unwrap();
        assert_eq!(fragment.clauses(), [Clause::new("wiki", "xwiki")]);
    }

    #[test]
    fn conjunction_of_clauses() {
        let fragment = parse("wiki:xwiki AND space_exact:Dev AND doc_final:false").unwrap();
        assert_eq!(fragment.clauses().len(), 3);
        assert_eq!(fragment.value("space_exact"), Some("Dev"));
        assert_eq!(fragment.value("doc_final"), Some("false"));
    }

    #[test]
    fn phrase_and_empty_value() {
        let fragment = parse(r#"space_exact:"" AND name_exact:"two words""#).unwrap();
        assert_eq!(fragment.value("space_exact"), Some(""));
        assert_eq!(fragment.value("name_exact"), Some("two words"));
    }

    #[test]
    fn escaped_value_is_one_clause() {
        let fragment = parse(r#"name_exact:a\:b\ \"c\""#).unwrap();
        assert_eq!(fragment.clauses(), [Clause::new("name_exact", "a:b \"c\"")]);
    }

    #[test]
    fn unescaped_value_is_rejected() {
        let err = parse(r#"name_exact:a:b "c""#).unwrap_err();
        assert!(err.message().contains("expected value after 'name_exact:'"));
        assert_eq!(err.position(), Some(11));
        assert_eq!(err.fragment.as_deref(), Some(r#"name_exact:a:b "c""#));
    }

    #[test]
    fn missing_and_is_rejected() {
        let err = parse("wiki:xwiki space_exact:Dev").unwrap_err();
        assert!(err.message().contains("expected AND"));
        assert_eq!(err.position(), Some(11));
        let rendered = err.to_string();
        let mut lines = rendered.lines();
        assert_eq!(lines.next(), Some("invalid fragment: expected AND between clauses"));
        assert_eq!(lines.next(), Some("  wiki:xwiki space_exact:Dev"));
        assert_eq!(lines.next().map(|line| line.find('^')), Some(Some(13)));
        assert!(lines.next().is_some_and(|line| line.starts_with("hint: join clauses")));
    }

    #[test]
    fn bare_term_is_rejected() {
        let err = parse("xwiki").unwrap_err();
        assert!(err.message().contains("expected field prefix"));
        assert_eq!(err.position(), Some(0));
    }

    #[test]
    fn trailing_and_is_rejected() {
        let err = parse("wiki:xwiki AND").unwrap_err();
        assert!(err.message().contains("expected field prefix"));
        assert_eq!(err.position(), None);
    }

    #[test]
    fn missing_value_points_past_prefix() {
        let err = parse("wiki:").unwrap_err();
        assert_eq!(err.position(), Some(5));
    }

    #[test]
    fn display_round_trip() {
        let fragment = QueryFragment::new()
            .clause("wiki", "xwiki")
            .clause("space_exact", "")
            .clause("name_exact", "C++ (draft)");
        assert_eq!(parse(&fragment.to_string()).unwrap(), fragment);
    }
}
