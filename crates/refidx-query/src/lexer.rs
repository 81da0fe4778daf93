//! Fragment lexer (tokenizer).
//!
//! Converts fragment text into a stream of tokens for the parser, resolving backslash
//! escapes as it goes.

use std::{iter::Peekable, str::Chars};

use crate::error::LexError;

/// A token in the fragment language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A bare word with escapes removed. `AND` is a word too; the parser gives it meaning.
    Term(String),

    /// A quoted phrase (the quotes are stripped, escapes removed).
    Phrase(String),

    /// Field prefix (e.g., "wiki:" produces FieldPrefix("wiki")).
    FieldPrefix(String),
}

/// A token with the byte position where it starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned {
    /// The token.
    pub token: Token,
    /// Byte offset in the input.
    pub position: usize,
}

/// Tokenizes a fragment string.
struct Lexer<'a> {
    /// The original input string.
    input: &'a str,
    /// Character iterator with one-character lookahead.
    chars: Peekable<Chars<'a>>,
    /// Current byte position in input.
    position: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.chars().peekable(),
            position: 0,
        }
    }

    /// Creates an error at a specific position.
    fn error_at(&self, message: impl Into<String>, position: usize) -> LexError {
        LexError::new(message, position, self.input)
    }

    /// Tokenizes the entire input, returning all tokens or an error.
    fn tokenize(mut self) -> Result<Vec<Spanned>, LexError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace();
            let position = self.position;
            let Some(token) = self.next_token()? else {
                break;
            };
            tokens.push(Spanned { token, position });
        }

        Ok(tokens)
    }

    /// Returns the next token, or None if at end of input.
    fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        let Some(&ch) = self.chars.peek() else {
            return Ok(None);
        };

        match ch {
            '"' => self.read_phrase().map(Some),
            '(' | ')' => Err(self.error_at(
                format!("unexpected '{ch}': grouping is not part of a fragment"),
                self.position,
            )),
            _ => self.read_term_or_field().map(Some),
        }
    }

    /// Reads a quoted phrase.
    fn read_phrase(&mut self) -> Result<Token, LexError> {
        let start_pos = self.position;
        self.advance(); // consume opening quote

        let mut content = String::new();

        loop {
            match self.chars.peek() {
                Some(&'"') => {
                    self.advance(); // consume closing quote
                    return Ok(Token::Phrase(content));
                }
                Some(&'\\') => content.push(self.read_escape()?),
                Some(&ch) => {
                    content.push(ch);
                    self.advance();
                }
                None => return Err(self.error_at("unclosed quote", start_pos)),
            }
        }
    }

    /// Reads a term or a field prefix.
    fn read_term_or_field(&mut self) -> Result<Token, LexError> {
        let start_pos = self.position;
        let mut word = String::new();

        while let Some(&ch) = self.chars.peek() {
            match ch {
                '\\' => {
                    word.push(self.read_escape()?);
                    continue;
                }
                ':' => {
                    self.advance(); // consume the colon
                    if word.is_empty() {
                        return Err(self.error_at("missing field name before ':'", start_pos));
                    }
                    return Ok(Token::FieldPrefix(word));
                }
                '(' | ')' | '"' => break,
                _ if ch.is_whitespace() => break,
                _ => {
                    word.push(ch);
                    self.advance();
                }
            }
        }

        Ok(Token::Term(word))
    }

    /// Reads a backslash escape and returns the escaped character.
    fn read_escape(&mut self) -> Result<char, LexError> {
        let start_pos = self.position;
        self.advance(); // consume '\'
        let Some(&ch) = self.chars.peek() else {
            return Err(self.error_at("dangling escape at end of input", start_pos));
        };
        self.advance();
        Ok(ch)
    }

    /// Skips whitespace characters.
    fn skip_whitespace(&mut self) {
        while let Some(&ch) = self.chars.peek() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Advances to the next character.
    fn advance(&mut self) {
        if let Some(ch) = self.chars.next() {
            self.position += ch.len_utf8();
        }
    }
}

/// Tokenizes a fragment string.
pub fn tokenize(input: &str) -> Result<Vec<Spanned>, LexError> {
    Lexer::new(input).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token> {
        tokenize(input)
            .unwrap()
            .into_iter()
            .map(|s| s.token)
            .collect()
    }

    #[test]
    fn empty_input() {
        assert_eq!(tokens(""), vec![]);
        assert_eq!(tokens("   "), vec![]);
    }

    #[test]
    fn field_and_value() {
        assert_eq!(
            tokens("wiki:xwiki"),
            vec![Token::FieldPrefix("wiki".into()), Token::Term("xwiki".into())]
        );
    }

    #[test]
    fn conjunction() {
        assert_eq!(
            tokens("wiki:xwiki AND doc_final:true"),
            vec![
                Token::FieldPrefix("wiki".into()),
                Token::Term("xwiki".into()),
                Token::Term("AND".into()),
                Token::FieldPrefix("doc_final".into()),
                Token::Term("true".into()),
            ]
        );
    }

    #[test]
    fn escapes_are_resolved() {
        assert_eq!(
            tokens(r#"name_exact:a\:b\ \"c\""#),
            vec![
                Token::FieldPrefix("name_exact".into()),
                Token::Term("a:b \"c\"".into())
            ]
        );
    }

    #[test]
    fn unescaped_specials_split_the_value() {
        assert_eq!(
            tokens(r#"name_exact:a:b "c""#),
            vec![
                Token::FieldPrefix("name_exact".into()),
                Token::FieldPrefix("a".into()),
                Token::Term("b".into()),
                Token::Phrase("c".into()),
            ]
        );
    }

    #[test]
    fn empty_phrase() {
        assert_eq!(
            tokens(r#"space_exact:"""#),
            vec![Token::FieldPrefix("space_exact".into()), Token::Phrase(String::new())]
        );
    }

    #[test]
    fn positions_are_byte_offsets() {
        let spanned = tokenize("wiki:x AND y:z").unwrap();
        let positions: Vec<usize> = spanned.iter().map(|s| s.position).collect();
        assert_eq!(positions, [0, 5, 7, 11, 13]);
    }

    #[test]
    fn unclosed_quote_error() {
        let err = tokenize("space_exact:\"Dev").unwrap_err();
        assert_eq!(err.position, 12);
        assert!(err.message.contains("unclosed"));
    }

    #[test]
    fn dangling_escape_error() {
        let err = tokenize("wiki:x\\").unwrap_err();
        assert!(err.message.contains("dangling escape"));
    }

    #[test]
    fn grouping_is_rejected() {
        let err = tokenize("(wiki:x)").unwrap_err();
        assert_eq!(err.position, 0);
        assert!(err.message.contains("grouping"));
    }
}
