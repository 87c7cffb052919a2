/**
 * Composition Service
 *
 * The write path for compositions. Every mutation commits the primary
 * row and exactly one version snapshot in a single transaction, then
 * invokes the index projector with the post-commit record.
 *
 * # Commit Discipline
 *
 * (primary store write, version log append) is atomic: if either
 * fails, the transaction rolls back and the mutation never happened.
 * The index upsert runs after the commit and is best-effort; a failure
 * there is logged and left to reindex/rebuild to reconcile.
 *
 * # Authorization
 *
 * The caller's identity is passed explicitly into every operation.
 * A missing composition is `NotFound`; an existing composition owned
 * by someone else is `Unauthorized`.
 */

use std::sync::Arc;

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::compositions::db::{
    self, Composition,
};
use crate::compositions::versions::{self, VersionSnapshot};
use crate::error::AppError;
use crate::pagination::{Page, PageQuery};
use crate::search::index::IndexEntry;
use crate::search::projector::CompositionIndexer;

pub const TITLE_MAX_CHARS: usize = 255;

/// Composition service shared across workers via `AppState`.
#[derive(Clone)]
pub struct CompositionService {
    pool: SqlitePool,
    indexer: Arc<dyn CompositionIndexer>,
}

impl CompositionService {
    pub fn new(pool: SqlitePool, indexer: Arc<dyn CompositionIndexer>) -> Self {
        Self { pool, indexer }
    }

    /// Create a composition with empty content and record its first
    /// snapshot.
    pub async fn create(&self, owner_id: Uuid, title: &str) -> Result<Composition, AppError> {
        validate_title(title)?;

        let mut tx = self.pool.begin().await?;
        let composition = db::insert_composition(&mut tx, owner_id, title).await?;
        versions::append_snapshot(
            &mut tx,
            composition.id,
            owner_id,
            &composition.title,
            &composition.content,
        )
        .await?;
        tx.commit().await?;

        tracing::info!("Created composition {} for account {}", composition.id, owner_id);
        self.project_upsert(&composition);
        Ok(composition)
    }

    /// Update the title of a composition owned by the caller.
    pub async fn update_title(
        &self,
        caller: Uuid,
        id: Uuid,
        title: &str,
    ) -> Result<Composition, AppError> {
        validate_title(title)?;
        self.check_ownership(id, caller).await?;

        let mut tx = self.pool.begin().await?;
        let composition = db::update_title(&mut tx, id, title)
            .await?
            .ok_or_else(composition_not_found)?;
        versions::append_snapshot(&mut tx, id, caller, &composition.title, &composition.content)
            .await?;
        tx.commit().await?;

        self.project_upsert(&composition);
        Ok(composition)
    }

    /// Update the content of a composition owned by the caller.
    pub async fn update_content(
        &self,
        caller: Uuid,
        id: Uuid,
        content: &str,
    ) -> Result<Composition, AppError> {
        self.check_ownership(id, caller).await?;

        let mut tx = self.pool.begin().await?;
        let composition = db::update_content(&mut tx, id, content)
            .await?
            .ok_or_else(composition_not_found)?;
        versions::append_snapshot(&mut tx, id, caller, &composition.title, &composition.content)
            .await?;
        tx.commit().await?;

        self.project_upsert(&composition);
        Ok(composition)
    }

    /// Delete a composition owned by the caller. Version snapshots are
    /// retained and remain queryable through the version log.
    pub async fn delete(&self, caller: Uuid, id: Uuid) -> Result<(), AppError> {
        self.check_ownership(id, caller).await?;

        let mut tx = self.pool.begin().await?;
        db::delete_composition(&mut tx, id).await?;
        tx.commit().await?;

        tracing::info!("Deleted composition {}", id);
        if let Err(e) = self.indexer.delete(id) {
            tracing::error!("Index delete for composition {} failed: {}", id, e);
        }
        Ok(())
    }

    /// Fetch a composition the caller owns.
    pub async fn get_by_id(&self, caller: Uuid, id: Uuid) -> Result<Composition, AppError> {
        let composition = db::get_composition_by_id(&self.pool, id)
            .await?
            .ok_or_else(composition_not_found)?;

        if composition.owner_id != caller {
            return Err(AppError::Unauthorized);
        }
        Ok(composition)
    }

    /// One page of the caller's composition ids, most recently updated
    /// first.
    pub async fn list_owned_ids(
        &self,
        owner_id: Uuid,
        page: PageQuery,
    ) -> Result<Page<Uuid>, AppError> {
        let ids = db::list_ids_by_owner(&self.pool, owner_id, page.size(), page.offset()).await?;
        let total = db::count_by_owner(&self.pool, owner_id).await? as u64;
        Ok(Page::new(ids, page, total))
    }

    /// Version history for a composition the caller owns: newest
    /// first, capped at the 100 most recent snapshots.
    pub async fn get_history(
        &self,
        caller: Uuid,
        id: Uuid,
    ) -> Result<Vec<VersionSnapshot>, AppError> {
        self.check_ownership(id, caller).await?;
        Ok(versions::get_snapshots(&self.pool, id).await?)
    }

    /// NotFound when the id is unknown, Unauthorized when it belongs
    /// to someone else.
    async fn check_ownership(&self, id: Uuid, caller: Uuid) -> Result<(), AppError> {
        if db::exists_by_id_and_owner(&self.pool, id, caller).await? {
            return Ok(());
        }
        if db::exists_by_id(&self.pool, id).await? {
            return Err(AppError::Unauthorized);
        }
        Err(composition_not_found())
    }

    /// Post-commit indexing hook. Failures are logged, never
    /// propagated; the client's mutation has already committed.
    fn project_upsert(&self, composition: &Composition) {
        let entry = IndexEntry {
            id: composition.id,
            title: composition.title.clone(),
            content: composition.content.clone(),
            owner_id: composition.owner_id,
        };
        if let Err(e) = self.indexer.upsert(entry) {
            tracing::error!("Index upsert for composition {} failed: {}", composition.id, e);
        }
    }
}

fn composition_not_found() -> AppError {
    AppError::not_found_resource("Composition not found", "composition")
}

fn validate_title(title: &str) -> Result<(), AppError> {
    if title.trim().is_empty() {
        return Err(AppError::Validation("Title must not be empty".to_string()));
    }
    if title.chars().count() > TITLE_MAX_CHARS {
        return Err(AppError::Validation(format!(
            "Title must be at most {TITLE_MAX_CHARS} characters"
        )));
    }
    Ok(())
}
