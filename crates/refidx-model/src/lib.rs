//! Hierarchical entity references for refidx.
//!
//! This crate models the addressable items of a wiki as an ancestor chain of typed, named
//! segments:
//!
//! ```text
//! wiki → space → space* → document[locale] → attachment
//!                                          → object → object property
//! ```
//!
//! It provides:
//! - [`EntityKind`], the closed set of segment kinds and their legal parents
//! - [`EntityReference`], an immutable reference whose ancestors are shared
//! - [`Locale`] tags that distinguish original documents from translations
//! - A textual serialization (`wiki:Space.Page@file`) and its inverse, [`resolve_str`]
//!
//! # Example
//!
//! ```
//! use refidx_model::{EntityDefaults, EntityKind, EntityReference, resolve_str, serialize};
//!
//! let wiki = EntityReference::wiki("xwiki").unwrap();
//! let space = EntityReference::space("Sandbox", &wiki).unwrap();
//! let page = EntityReference::document("Test", &space).unwrap();
//! assert_eq!(serialize(&page), "xwiki:Sandbox.Test");
//!
//! let resolved =
//!     resolve_str("xwiki:Sandbox.Test", EntityKind::Document, None, &EntityDefaults::default())
//!         .unwrap();
//! assert_eq!(resolved, page);
//! ```

#![warn(missing_docs)]

mod error;
mod kind;
mod locale;
mod object;
mod reference;
mod resolve;
mod serialize;

pub use error::ReferenceError;
pub use kind::{EntityKind, UnknownKind};
pub use locale::Locale;
pub use object::ObjectName;
pub use reference::{Ancestors, EntityReference};
pub use resolve::{EntityDefaults, resolve_str};
pub use serialize::{ESCAPE, SEPARATORS, escape_name, serialize, serialize_local};
