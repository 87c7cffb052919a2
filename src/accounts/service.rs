/**
 * Account Service
 *
 * Registration, self-service profile updates, and account deletion.
 * Deleting an account cascades to its compositions (two-statement
 * transaction) and drops their search index entries afterwards.
 */

use std::sync::Arc;

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::accounts::db::{self, Account};
use crate::compositions::db as compositions_db;
use crate::error::types::map_unique_violation;
use crate::error::AppError;
use crate::search::projector::CompositionIndexer;

pub const USERNAME_MIN_CHARS: usize = 3;
pub const USERNAME_MAX_CHARS: usize = 50;
pub const EMAIL_MAX_CHARS: usize = 255;
pub const PASSWORD_MIN_CHARS: usize = 8;

/// Account service shared across workers via `AppState`.
#[derive(Clone)]
pub struct AccountService {
    pool: SqlitePool,
    indexer: Arc<dyn CompositionIndexer>,
    bcrypt_cost: u32,
}

impl AccountService {
    pub fn new(pool: SqlitePool, indexer: Arc<dyn CompositionIndexer>, bcrypt_cost: u32) -> Self {
        Self {
            pool,
            indexer,
            bcrypt_cost,
        }
    }

    /// Register a new account.
    ///
    /// # Errors
    ///
    /// `Validation` for malformed fields, `Conflict` when the username
    /// or email is already taken.
    pub async fn create(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Account, AppError> {
        validate_username(username)?;
        validate_email(email)?;
        validate_password(password)?;

        if db::get_account_by_email(&self.pool, email).await?.is_some() {
            return Err(AppError::Conflict("Email already in use".to_string()));
        }
        if db::get_account_by_username(&self.pool, username).await?.is_some() {
            return Err(AppError::Conflict("Username already in use".to_string()));
        }

        let password_hash = bcrypt::hash(password, self.bcrypt_cost)?;

        let mut tx = self.pool.begin().await?;
        let account = db::create_account(&mut tx, username, email, &password_hash)
            .await
            .map_err(|e| map_unique_violation(e, "Username or email already in use"))?;
        tx.commit().await?;

        tracing::info!("Created account {} ({})", account.id, account.username);
        Ok(account)
    }

    /// Update the caller's email address.
    pub async fn update_email(&self, id: Uuid, email: &str) -> Result<Account, AppError> {
        validate_email(email)?;
        db::update_email(&self.pool, id, email)
            .await
            .map_err(|e| map_unique_violation(e, "Email already in use"))?
            .ok_or_else(account_not_found)
    }

    /// Update the caller's username.
    pub async fn update_username(&self, id: Uuid, username: &str) -> Result<Account, AppError> {
        validate_username(username)?;
        db::update_username(&self.pool, id, username)
            .await
            .map_err(|e| map_unique_violation(e, "Username already in use"))?
            .ok_or_else(account_not_found)
    }

    /// Re-hash and store a new password for the caller.
    pub async fn update_password(&self, id: Uuid, password: &str) -> Result<Account, AppError> {
        validate_password(password)?;
        let password_hash = bcrypt::hash(password, self.bcrypt_cost)?;
        db::update_password_hash(&self.pool, id, &password_hash)
            .await?
            .ok_or_else(account_not_found)
    }

    /// Delete the caller's account and everything it owns.
    ///
    /// Compositions go in the same transaction as the account row;
    /// their index entries are dropped once the transaction commits.
    /// Version snapshots are retained.
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;
        let owned = compositions_db::delete_by_owner(&mut tx, id).await?;
        let removed = db::delete_account(&mut tx, id).await?;
        if removed == 0 {
            // Nothing to delete; let the transaction drop.
            return Err(account_not_found());
        }
        tx.commit().await?;

        for composition_id in &owned {
            if let Err(e) = self.indexer.delete(*composition_id) {
                tracing::error!(
                    "Index delete for composition {} failed during account cascade: {}",
                    composition_id,
                    e
                );
            }
        }

        tracing::info!("Deleted account {} and {} compositions", id, owned.len());
        Ok(())
    }

    /// Fetch the caller's account.
    pub async fn get_by_id(&self, id: Uuid) -> Result<Account, AppError> {
        db::get_account_by_id(&self.pool, id)
            .await?
            .ok_or_else(account_not_found)
    }
}

fn account_not_found() -> AppError {
    AppError::not_found_resource("Account not found", "account")
}

fn validate_username(username: &str) -> Result<(), AppError> {
    let len = username.chars().count();
    if !(USERNAME_MIN_CHARS..=USERNAME_MAX_CHARS).contains(&len) {
        return Err(AppError::Validation(format!(
            "Username must be {USERNAME_MIN_CHARS}-{USERNAME_MAX_CHARS} characters"
        )));
    }
    Ok(())
}

/// Syntactic email check: exactly one '@' with non-empty local and
/// domain parts, no whitespace, within the length cap.
fn validate_email(email: &str) -> Result<(), AppError> {
    if email.chars().count() > EMAIL_MAX_CHARS {
        return Err(AppError::Validation(format!(
            "Email must be at most {EMAIL_MAX_CHARS} characters"
        )));
    }
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if !valid {
        return Err(AppError::Validation("Invalid email address".to_string()));
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), AppError> {
    if password.chars().count() < PASSWORD_MIN_CHARS {
        return Err(AppError::Validation(format!(
            "Password must be at least {PASSWORD_MIN_CHARS} characters"
        )));
    }
    Ok(())
}
