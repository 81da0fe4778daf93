//! Mapping between wiki entity references and search index records.
//!
//! This crate connects the reference model of `refidx-model` to a flat search index in both
//! directions:
//!
//! - [`Resolver`] expands a reference into every entity whose record belongs under it,
//!   computes index identifiers, builds the [`QueryFragment`](refidx_query::QueryFragment)
//!   that selects that subtree, and produces the [`IndexRecord`] an indexer writes
//! - [`Decoder`] rebuilds a reference from a record
//! - [`RecordIndex`] stores records in Tantivy and answers fragments against them
//!
//! Entities are looked up through the [`EntityStore`] trait; [`MemoryStore`] is an
//! in-memory implementation.
//!
//! # Example
//!
//! ```
//! use refidx_index::{Decoder, MemoryStore, Resolver};
//! use refidx_model::{EntityDefaults, EntityReference};
//!
//! let wiki = EntityReference::wiki("xwiki").unwrap();
//! let space = EntityReference::space("Sandbox", &wiki).unwrap();
//! let page = EntityReference::document("Test", &space).unwrap();
//! let logo = EntityReference::attachment("logo.png", &page).unwrap();
//!
//! let mut store = MemoryStore::new();
//! store.add(&logo);
//! let defaults = EntityDefaults::default();
//! let resolver = Resolver::new(&store, &defaults);
//!
//! let expansion = resolver.expand(&space).unwrap();
//! assert_eq!(expansion.references, vec![page.clone(), logo]);
//!
//! let query = resolver.query(&page).unwrap();
//! assert_eq!(
//!     query.to_string(),
//!     "wiki:xwiki AND space_exact:Sandbox AND name_exact:Test AND doc_final:true"
//! );
//!
//! let record = resolver.record(&page).unwrap();
//! assert_eq!(Decoder::new(&defaults).decode(&record).unwrap(), page);
//! ```

#![warn(missing_docs)]

mod decode;
mod error;
mod expand;
pub mod fields;
mod index;
mod location;
mod memory;
mod record;
mod schema;
mod store;

pub use decode::Decoder;
pub use error::{DecodeError, IndexError, ResolveError, StoreError};
pub use expand::{
    AttachmentExpander, Context, DocumentExpander, Expansion, ObjectExpander, PropertyExpander,
    ReferenceExpander, Resolver, SkippedChild, SpaceExpander, WikiExpander,
};
pub use index::RecordIndex;
pub use memory::MemoryStore;
pub use record::{FieldValue, IndexRecord};
pub use schema::IndexSchema;
pub use store::{EntityStore, ObjectSlots, StoredDocument};
