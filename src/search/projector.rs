//! Index Projector
//!
//! The post-commit hook through which composition writes reach the
//! search index. The composition service holds this as a plain trait
//! object, so indexing stays decoupled from the write path and tests
//! can substitute a recording stub.
//!
//! Projection failures never roll back the primary commit; callers log
//! them and rely on reindex/rebuild for reconciliation.

use thiserror::Error;
use uuid::Uuid;

use super::index::{IndexEntry, SearchIndex};

/// Failure while projecting a mutation into the search index.
#[derive(Debug, Error)]
#[error("Index projection failed: {0}")]
pub struct ProjectionError(pub String);

/// Post-commit hook mirroring composition mutations into the index.
pub trait CompositionIndexer: Send + Sync {
    /// Mirror a create or update.
    fn upsert(&self, entry: IndexEntry) -> Result<(), ProjectionError>;

    /// Mirror a delete.
    fn delete(&self, id: Uuid) -> Result<(), ProjectionError>;
}

impl CompositionIndexer for SearchIndex {
    fn upsert(&self, entry: IndexEntry) -> Result<(), ProjectionError> {
        SearchIndex::upsert(self, entry);
        Ok(())
    }

    fn delete(&self, id: Uuid) -> Result<(), ProjectionError> {
        self.delete_by_id(id);
        Ok(())
    }
}