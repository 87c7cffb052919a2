/**
 * Search Service
 *
 * Query entry points over the search index plus the reconciliation
 * operations: single-document reindex and full rebuild from the
 * primary store.
 */

use std::sync::Arc;

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::compositions::db::{get_composition_by_id, list_all_compositions};
use crate::error::AppError;
use crate::pagination::{Page, PageQuery};
use crate::search::index::{IndexEntry, SearchHit, SearchIndex};

/// Search service shared across workers via `AppState`.
#[derive(Clone)]
pub struct SearchService {
    pool: SqlitePool,
    index: Arc<SearchIndex>,
}

impl SearchService {
    pub fn new(pool: SqlitePool, index: Arc<SearchIndex>) -> Self {
        Self { pool, index }
    }

    /// Exact term search scoped to one owner.
    pub fn search(&self, query: &str, owner_id: Uuid, page: PageQuery) -> Page<SearchHit> {
        self.index.exact_search(query, Some(owner_id), page)
    }

    /// Typo-tolerant search scoped to one owner.
    pub fn fuzzy_search(&self, query: &str, owner_id: Uuid, page: PageQuery) -> Page<SearchHit> {
        self.index.fuzzy_search(query, Some(owner_id), page)
    }

    /// Re-project a single composition from the primary store.
    ///
    /// A composition that no longer exists is removed from the index
    /// instead, making this the catch-all repair for a missed delete.
    pub async fn reindex(&self, id: Uuid) -> Result<(), AppError> {
        match get_composition_by_id(&self.pool, id).await? {
            Some(composition) => {
                self.index.upsert(IndexEntry {
                    id: composition.id,
                    title: composition.title,
                    content: composition.content,
                    owner_id: composition.owner_id,
                });
                tracing::info!("Reindexed composition {}", id);
            }
            None => {
                self.index.delete_by_id(id);
                tracing::info!("Removed stale index entry for composition {}", id);
            }
        }
        Ok(())
    }

    /// Drop the whole index and replay every composition row.
    ///
    /// Safe to run while writes are in flight: a write that lands
    /// after the snapshot point simply overwrites the replayed entry.
    pub async fn rebuild(&self) -> Result<usize, AppError> {
        let compositions = list_all_compositions(&self.pool).await?;
        self.index.clear();

        let count = compositions.len();
        for composition in compositions {
            self.index.upsert(IndexEntry {
                id: composition.id,
                title: composition.title,
                content: composition.content,
                owner_id: composition.owner_id,
            });
        }

        tracing::info!("Rebuilt search index with {} entries", count);
        Ok(count)
    }
}
