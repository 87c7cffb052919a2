/**
 * Account Model and Database Operations
 *
 * This module handles account rows in the credential store: creation,
 * identifier lookups, self-service updates, and deletion.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;

/// Account struct representing a row in the credential store
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Account {
    /// Unique account id (UUID)
    pub id: Uuid,
    /// Username (unique, 3-50 chars)
    pub username: String,
    /// Email address (unique)
    pub email: String,
    /// Hashed password (bcrypt); never leaves the service
    pub password_hash: String,
    /// Creation timestamp, immutable after insert
    pub created_at: DateTime<Utc>,
}

const ACCOUNT_COLUMNS: &str = "id, username, email, password_hash, created_at";

/// Insert a new account row.
pub async fn create_account(
    conn: &mut SqliteConnection,
    username: &str,
    email: &str,
    password_hash: &str,
) -> Result<Account, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO accounts (id, username, email, password_hash, created_at)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(id)
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .bind(now)
    .execute(conn)
    .await?;

    Ok(Account {
        id,
        username: username.to_string(),
        email: email.to_string(),
        password_hash: password_hash.to_string(),
        created_at: now,
    })
}

/// Get account by id
pub async fn get_account_by_id(
    pool: &SqlitePool,
    id: Uuid,
) -> Result<Option<Account>, sqlx::Error> {
    sqlx::query_as::<_, Account>(&format!(
        "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Get account by email (case-sensitive match)
pub async fn get_account_by_email(
    pool: &SqlitePool,
    email: &str,
) -> Result<Option<Account>, sqlx::Error> {
    sqlx::query_as::<_, Account>(&format!(
        "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE email = $1"
    ))
    .bind(email)
    .fetch_optional(pool)
    .await
}

/// Get account by username (case-sensitive match)
pub async fn get_account_by_username(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<Account>, sqlx::Error> {
    sqlx::query_as::<_, Account>(&format!(
        "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE username = $1"
    ))
    .bind(username)
    .fetch_optional(pool)
    .await
}

/// Resolve a login identifier against email first, then username.
pub async fn get_account_by_identifier(
    pool: &SqlitePool,
    identifier: &str,
) -> Result<Option<Account>, sqlx::Error> {
    if let Some(account) = get_account_by_email(pool, identifier).await? {
        return Ok(Some(account));
    }
    get_account_by_username(pool, identifier).await
}

/// Update an account's email address.
pub async fn update_email(
    pool: &SqlitePool,
    id: Uuid,
    email: &str,
) -> Result<Option<Account>, sqlx::Error> {
    sqlx::query(r#"UPDATE accounts SET email = $1 WHERE id = $2"#)
        .bind(email)
        .bind(id)
        .execute(pool)
        .await?;

    get_account_by_id(pool, id).await
}

/// Update an account's username.
pub async fn update_username(
    pool: &SqlitePool,
    id: Uuid,
    username: &str,
) -> Result<Option<Account>, sqlx::Error> {
    sqlx::query(r#"UPDATE accounts SET username = $1 WHERE id = $2"#)
        .bind(username)
        .bind(id)
        .execute(pool)
        .await?;

    get_account_by_id(pool, id).await
}

/// Replace an account's password hash.
pub async fn update_password_hash(
    pool: &SqlitePool,
    id: Uuid,
    password_hash: &str,
) -> Result<Option<Account>, sqlx::Error> {
    sqlx::query(r#"UPDATE accounts SET password_hash = $1 WHERE id = $2"#)
        .bind(password_hash)
        .bind(id)
        .execute(pool)
        .await?;

    get_account_by_id(pool, id).await
}

/// Delete an account row. Owned compositions are removed by the caller
/// inside the same transaction; see `accounts::service`.
pub async fn delete_account(conn: &mut SqliteConnection, id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(r#"DELETE FROM accounts WHERE id = $1"#)
        .bind(id)
        .execute(conn)
        .await?;

    Ok(result.rows_affected())
}
