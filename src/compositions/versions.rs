/**
 * Version Log
 *
 * Append-only audit of every committed composition mutation. Each
 * commit writes one row carrying a globally unique commit id, a per-
 * composition monotonic sequence number, the author, and a full
 * snapshot of the post-commit fields. Rows are never updated or
 * deleted and outlive the composition they describe.
 */

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;

/// How many snapshots a history query returns at most.
pub const HISTORY_LIMIT: u32 = 100;

/// An immutable snapshot of a composition at one commit.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct VersionSnapshot {
    #[serde(rename = "commitId")]
    pub commit_id: Uuid,
    /// Monotonic per composition, starting at 1
    pub seq: i64,
    #[serde(rename = "timestamp")]
    pub committed_at: DateTime<Utc>,
    /// Account that committed the mutation
    pub author: Uuid,
    pub title: String,
    pub content: String,
}

/// Append one snapshot inside the caller's transaction.
///
/// The sequence number is derived from the current maximum for the
/// composition; the per-row lock taken by the preceding primary-store
/// write serializes concurrent commits, so the max cannot move under
/// us within the transaction.
pub async fn append_snapshot(
    conn: &mut SqliteConnection,
    composition_id: Uuid,
    author: Uuid,
    title: &str,
    content: &str,
) -> Result<VersionSnapshot, sqlx::Error> {
    let next_seq: i64 = sqlx::query_scalar(
        r#"
        SELECT COALESCE(MAX(seq), 0) + 1
        FROM composition_versions
        WHERE composition_id = $1
        "#,
    )
    .bind(composition_id)
    .fetch_one(&mut *conn)
    .await?;

    let commit_id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO composition_versions
            (commit_id, composition_id, seq, committed_at, author, title, content)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(commit_id)
    .bind(composition_id)
    .bind(next_seq)
    .bind(now)
    .bind(author)
    .bind(title)
    .bind(content)
    .execute(conn)
    .await?;

    Ok(VersionSnapshot {
        commit_id,
        seq: next_seq,
        committed_at: now,
        author,
        title: title.to_string(),
        content: content.to_string(),
    })
}

/// Snapshots for a composition in commit order, newest first, capped
/// at the 100 most recent.
pub async fn get_snapshots(
    pool: &SqlitePool,
    composition_id: Uuid,
) -> Result<Vec<VersionSnapshot>, sqlx::Error> {
    sqlx::query_as::<_, VersionSnapshot>(
        r#"
        SELECT commit_id, seq, committed_at, author, title, content
        FROM composition_versions
        WHERE composition_id = $1
        ORDER BY seq DESC
        LIMIT $2
        "#,
    )
    .bind(composition_id)
    .bind(HISTORY_LIMIT)
    .fetch_all(pool)
    .await
}

/// Total snapshots recorded for a composition.
pub async fn count_snapshots(pool: &SqlitePool, composition_id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        r#"SELECT COUNT(*) FROM composition_versions WHERE composition_id = $1"#,
    )
    .bind(composition_id)
    .fetch_one(pool)
    .await
}
