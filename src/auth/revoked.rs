//! Revocation ledger database operations
//!
//! Persistent set of (token, expiry) pairs that must be rejected even
//! while cryptographically valid. Rows are inserted on logout/refresh
//! and pruned by the cleanup scheduler once past their natural expiry.

use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;

/// Insert a token into the ledger.
///
/// Idempotent: revoking an already revoked token is a no-op thanks to
/// the unique constraint on `token`.
pub async fn insert_revoked(
    conn: &mut SqliteConnection,
    token: &str,
    expiry: DateTime<Utc>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO revoked_tokens (id, token, expiry)
        VALUES ($1, $2, $3)
        ON CONFLICT (token) DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(token)
    .bind(expiry)
    .execute(conn)
    .await?;

    Ok(())
}

/// Check whether a token is present in the ledger.
pub async fn is_revoked(pool: &SqlitePool, token: &str) -> Result<bool, sqlx::Error> {
    let exists: Option<i64> = sqlx::query_scalar(
        r#"
        SELECT 1 FROM revoked_tokens WHERE token = $1
        "#,
    )
    .bind(token)
    .fetch_optional(pool)
    .await?;

    Ok(exists.is_some())
}

/// Delete every ledger entry whose expiry is before `cutoff`.
///
/// # Returns
///
/// Number of rows removed.
pub async fn delete_expired(
    conn: &mut SqliteConnection,
    cutoff: DateTime<Utc>,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM revoked_tokens WHERE expiry < $1
        "#,
    )
    .bind(cutoff)
    .execute(conn)
    .await?;

    Ok(result.rows_affected())
}

/// Count ledger rows. Used by tests and the cleanup scheduler's logging.
pub async fn count_revoked(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(r#"SELECT COUNT(*) FROM revoked_tokens"#)
        .fetch_one(pool)
        .await
}
