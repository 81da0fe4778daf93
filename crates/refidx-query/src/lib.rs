//! Query fragments for selecting index records.
//!
//! A fragment is a conjunction of exact-match clauses in the Lucene/Solr query syntax:
//!
//! - **Clauses**: `name_exact:Setup` - the field must hold exactly this value
//! - **Conjunction**: `wiki:xwiki AND doc_final:true` - every clause must match
//! - **Escaping**: `name_exact:a\:b\ \"c\"` - special characters are backslash-escaped
//! - **Empty values**: `space_exact:""` - the field holds the empty string
//!
//! Fragments are built with [`QueryFragment`] and can be parsed back from text, which
//! lets callers (and tests) check that an escaped value survives as a single term.
//!
//! # Example
//!
//! ```
//! use refidx_query::QueryFragment;
//!
//! let fragment = QueryFragment::new()
//!     .clause("wiki", "xwiki")
//!     .clause("name_exact", "a:b \"c\"");
//! assert_eq!(fragment.to_string(), r#"wiki:xwiki AND name_exact:a\:b\ \"c\""#);
//!
//! let parsed: QueryFragment = fragment.to_string().parse().unwrap();
//! assert_eq!(parsed, fragment);
//! ```

#![warn(missing_docs)]

mod ast;
mod error;
mod escape;
mod fragment;
mod lexer;
mod parser;

pub use ast::Clause;
pub use error::{LexError, ParseError, QueryError, QueryErrorKind};
pub use escape::{SPECIAL_CHARS, escape_query_chars};
pub use fragment::{AND, QueryFragment};
pub use lexer::{Spanned, Token, tokenize};
pub use parser::parse;
