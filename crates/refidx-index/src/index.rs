//! A Tantivy index of reference records.

use std::{fs, path::Path};

use refidx_query::QueryFragment;
use tantivy::{
    Index, IndexWriter, TantivyDocument, Term, collector::TopDocs, directory::MmapDirectory,
};
use tracing::debug;

use crate::{IndexError, record::IndexRecord, schema::IndexSchema};

/// Default heap size for the index writer (50 MB).
const DEFAULT_HEAP_SIZE: usize = 50_000_000;

/// Stores index records and answers query fragments against them.
///
/// Added and deleted records become visible to [`search`](Self::search) once
/// [`commit`](Self::commit) is called.
pub struct RecordIndex {
    /// The Tantivy index.
    index: Index,
    /// The underlying Tantivy writer.
    writer: IndexWriter,
    /// Schema with field handles.
    schema: IndexSchema,
}

impl RecordIndex {
    /// Opens or creates an index at the given path.
    pub fn open(path: &Path) -> Result<Self, IndexError> {
        let schema = IndexSchema::new();
        fs::create_dir_all(path)?;

        let dir = MmapDirectory::open(path).map_err(|e| {
            let err: tantivy::TantivyError = e.into();
            IndexError::open_index(path.to_path_buf(), &err)
        })?;
        let index = Index::open_or_create(dir, schema.schema().clone())
            .map_err(|e| IndexError::open_index(path.to_path_buf(), &e))?;
        let writer = index
            .writer_with_num_threads(1, DEFAULT_HEAP_SIZE)
            .map_err(|e| IndexError::open_index(path.to_path_buf(), &e))?;

        debug!(path = %path.display(), "opened record index");
        Ok(Self {
            index,
            writer,
            schema,
        })
    }

    /// Creates an index held entirely in memory.
    pub fn create_in_ram() -> Result<Self, IndexError> {
        let schema = IndexSchema::new();
        let index = Index::create_in_ram(schema.schema().clone());
        let writer = index
            .writer_with_num_threads(1, DEFAULT_HEAP_SIZE)
            .map_err(|e| IndexError::write(&e))?;

        Ok(Self {
            index,
            writer,
            schema,
        })
    }

    /// Returns the schema.
    pub fn schema(&self) -> &IndexSchema {
        &self.schema
    }

    /// Stages a record for writing.
    pub fn add(&mut self, record: &IndexRecord) -> Result<(), IndexError> {
        self.writer
            .add_document(record.to_document(&self.schema))
            .map_err(|e| IndexError::write(&e))?;
        Ok(())
    }

    /// Stages several records for writing.
    pub fn add_all<'r>(
        &mut self,
        records: impl IntoIterator<Item = &'r IndexRecord>,
    ) -> Result<(), IndexError> {
        for record in records {
            self.add(record)?;
        }
        Ok(())
    }

    /// Stages the deletion of the record with identifier `id`.
    pub fn delete(&mut self, id: &str) {
        self.writer
            .delete_term(Term::from_field_text(self.schema.id, id));
    }

    /// Stages the deletion of every record the fragment selects.
    pub fn delete_matching(&mut self, fragment: &QueryFragment) -> Result<(), IndexError> {
        let query = self.schema.compile(fragment)?;
        self.writer
            .delete_query(query)
            .map_err(|e| IndexError::write(&e))?;
        debug!(%fragment, "staged deletion");
        Ok(())
    }

    /// Commits all pending changes.
    pub fn commit(&mut self) -> Result<(), IndexError> {
        self.writer.commit().map_err(|e| IndexError::commit(&e))?;
        Ok(())
    }

    /// Rolls back any uncommitted changes.
    pub fn rollback(&mut self) -> Result<(), IndexError> {
        self.writer.rollback().map_err(|e| IndexError::commit(&e))?;
        Ok(())
    }

    /// Returns up to `limit` committed records the fragment selects.
    pub fn search(
        &self,
        fragment: &QueryFragment,
        limit: usize,
    ) -> Result<Vec<IndexRecord>, IndexError> {
        let query = self.schema.compile(fragment)?;
        let reader = self.index.reader().map_err(|e| IndexError::search(&e))?;
        let searcher = reader.searcher();

        let top_docs = searcher
            .search(&query, &TopDocs::with_limit(limit.max(1)))
            .map_err(|e| IndexError::search(&e))?;

        let mut records = Vec::with_capacity(top_docs.len());
        for (_, address) in top_docs.into_iter().take(limit) {
            let doc: TantivyDocument = searcher.doc(address).map_err(|e| IndexError::search(&e))?;
            records.push(IndexRecord::from_document(&doc, &self.schema));
        }

        debug!(%fragment, hits = records.len(), "searched record index");
        Ok(records)
    }

    /// Returns the number of committed records.
    pub fn num_docs(&self) -> Result<u64, IndexError> {
        let reader = self.index.reader().map_err(|e| IndexError::search(&e))?;
        Ok(reader.searcher().num_docs())
    }
}
