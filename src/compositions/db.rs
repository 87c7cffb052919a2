/**
 * Composition Model and Database Operations
 *
 * Primary-store rows for compositions. Mutating operations take a
 * transaction connection so the service can commit the row update and
 * the version-log append atomically.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;

/// Composition struct representing a row in the primary store
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Composition {
    pub id: Uuid,
    /// Title (1-255 chars, non-empty)
    pub title: String,
    /// Body text; empty string at creation
    pub content: String,
    pub owner_id: Uuid,
    /// Refreshed on any field change
    pub updated_at: DateTime<Utc>,
}

const COMPOSITION_COLUMNS: &str = "id, title, content, owner_id, updated_at";

/// Insert a new composition with empty content.
pub async fn insert_composition(
    conn: &mut SqliteConnection,
    owner_id: Uuid,
    title: &str,
) -> Result<Composition, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO compositions (id, title, content, owner_id, updated_at)
        VALUES ($1, $2, '', $3, $4)
        "#,
    )
    .bind(id)
    .bind(title)
    .bind(owner_id)
    .bind(now)
    .execute(conn)
    .await?;

    Ok(Composition {
        id,
        title: title.to_string(),
        content: String::new(),
        owner_id,
        updated_at: now,
    })
}

/// Update the title, refreshing `updated_at`.
pub async fn update_title(
    conn: &mut SqliteConnection,
    id: Uuid,
    title: &str,
) -> Result<Option<Composition>, sqlx::Error> {
    let now = Utc::now();
    sqlx::query(r#"UPDATE compositions SET title = $1, updated_at = $2 WHERE id = $3"#)
        .bind(title)
        .bind(now)
        .bind(id)
        .execute(&mut *conn)
        .await?;

    get_composition_conn(conn, id).await
}

/// Update the content, refreshing `updated_at`.
pub async fn update_content(
    conn: &mut SqliteConnection,
    id: Uuid,
    content: &str,
) -> Result<Option<Composition>, sqlx::Error> {
    let now = Utc::now();
    sqlx::query(r#"UPDATE compositions SET content = $1, updated_at = $2 WHERE id = $3"#)
        .bind(content)
        .bind(now)
        .bind(id)
        .execute(&mut *conn)
        .await?;

    get_composition_conn(conn, id).await
}

/// Delete a composition row. Version-log rows are left in place.
pub async fn delete_composition(
    conn: &mut SqliteConnection,
    id: Uuid,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(r#"DELETE FROM compositions WHERE id = $1"#)
        .bind(id)
        .execute(conn)
        .await?;

    Ok(result.rows_affected())
}

/// Get composition by id
pub async fn get_composition_by_id(
    pool: &SqlitePool,
    id: Uuid,
) -> Result<Option<Composition>, sqlx::Error> {
    sqlx::query_as::<_, Composition>(&format!(
        "SELECT {COMPOSITION_COLUMNS} FROM compositions WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

async fn get_composition_conn(
    conn: &mut SqliteConnection,
    id: Uuid,
) -> Result<Option<Composition>, sqlx::Error> {
    sqlx::query_as::<_, Composition>(&format!(
        "SELECT {COMPOSITION_COLUMNS} FROM compositions WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(conn)
    .await
}

/// Indexed ownership predicate backing the authorization checks.
pub async fn exists_by_id_and_owner(
    pool: &SqlitePool,
    id: Uuid,
    owner_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let exists: Option<i64> = sqlx::query_scalar(
        r#"SELECT 1 FROM compositions WHERE id = $1 AND owner_id = $2"#,
    )
    .bind(id)
    .bind(owner_id)
    .fetch_optional(pool)
    .await?;

    Ok(exists.is_some())
}

/// Existence check without an ownership constraint; used to tell
/// NotFound apart from Unauthorized.
pub async fn exists_by_id(pool: &SqlitePool, id: Uuid) -> Result<bool, sqlx::Error> {
    let exists: Option<i64> = sqlx::query_scalar(r#"SELECT 1 FROM compositions WHERE id = $1"#)
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(exists.is_some())
}

/// One page of owned composition ids, updated_at descending with id
/// ascending as the tie-break.
pub async fn list_ids_by_owner(
    pool: &SqlitePool,
    owner_id: Uuid,
    limit: u32,
    offset: u64,
) -> Result<Vec<Uuid>, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        SELECT id FROM compositions
        WHERE owner_id = $1
        ORDER BY updated_at DESC, id ASC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(owner_id)
    .bind(limit)
    // At most (2^32 - 1) * 100, well inside i64.
    .bind(offset as i64)
    .fetch_all(pool)
    .await
}

/// Total number of compositions owned by an account.
pub async fn count_by_owner(pool: &SqlitePool, owner_id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(r#"SELECT COUNT(*) FROM compositions WHERE owner_id = $1"#)
        .bind(owner_id)
        .fetch_one(pool)
        .await
}

/// All ids owned by an account. Used by the account cascade delete.
pub async fn all_ids_by_owner(
    conn: &mut SqliteConnection,
    owner_id: Uuid,
) -> Result<Vec<Uuid>, sqlx::Error> {
    sqlx::query_scalar(r#"SELECT id FROM compositions WHERE owner_id = $1"#)
        .bind(owner_id)
        .fetch_all(conn)
        .await
}

/// Delete every composition owned by an account, returning the ids so
/// the caller can drop the matching index entries.
pub async fn delete_by_owner(
    conn: &mut SqliteConnection,
    owner_id: Uuid,
) -> Result<Vec<Uuid>, sqlx::Error> {
    let ids = all_ids_by_owner(&mut *conn, owner_id).await?;
    sqlx::query(r#"DELETE FROM compositions WHERE owner_id = $1"#)
        .bind(owner_id)
        .execute(conn)
        .await?;

    Ok(ids)
}

/// Load every composition row. Used by index rebuild.
pub async fn list_all_compositions(pool: &SqlitePool) -> Result<Vec<Composition>, sqlx::Error> {
    sqlx::query_as::<_, Composition>(&format!(
        "SELECT {COMPOSITION_COLUMNS} FROM compositions ORDER BY updated_at DESC"
    ))
    .fetch_all(pool)
    .await
}
