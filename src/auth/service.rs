/**
 * Auth Service
 *
 * Composes the credential store, token codec, and revocation ledger to
 * implement the session-token lifecycle: issue, refresh, revoke, and
 * validate.
 *
 * # Token Lifecycle
 *
 * - `issue` authenticates a login identifier and password, then mints a
 *   fresh token whose subject is the account id.
 * - `refresh` rotates a token atomically: the old token lands in the
 *   revocation ledger (keyed on its own natural expiry) and a new one
 *   is minted for the same subject.
 * - `revoke` records a cryptographically valid token in the ledger;
 *   revoking twice is a no-op.
 * - `validate` is the read side: signature, expiry, and ledger checks.
 *
 * # Security
 *
 * Login failures are indistinguishable: unknown identifier and wrong
 * password both surface as `InvalidCredentials`.
 */

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::accounts::db::get_account_by_identifier;
use crate::auth::revoked::{insert_revoked, is_revoked};
use crate::auth::tokens::{Claims, TokenCodec};
use crate::error::AppError;

/// A freshly minted token and its expiry instant.
#[derive(Debug, Clone)]
pub struct TokenWithExpiry {
    pub token: String,
    pub expiry: DateTime<Utc>,
}

/// Auth service shared across workers via `AppState`.
#[derive(Clone)]
pub struct AuthService {
    pool: SqlitePool,
    codec: TokenCodec,
}

impl AuthService {
    pub fn new(pool: SqlitePool, codec: TokenCodec) -> Self {
        Self { pool, codec }
    }

    /// Authenticate an identifier/password pair and mint a token.
    ///
    /// The identifier is matched against email first, then username,
    /// both case-sensitive.
    ///
    /// # Errors
    ///
    /// `InvalidCredentials` when no account matches or the password
    /// fails verification; the two cases are not distinguished.
    pub async fn issue(&self, identifier: &str, password: &str) -> Result<TokenWithExpiry, AppError> {
        let account = get_account_by_identifier(&self.pool, identifier)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let valid = bcrypt::verify(password, &account.password_hash)?;
        if !valid {
            tracing::debug!("Password verification failed for identifier");
            return Err(AppError::InvalidCredentials);
        }

        let (token, expiry) = self
            .codec
            .mint(account.id)
            .map_err(AppError::Signing)?;

        tracing::info!("Issued token for account {}", account.id);
        Ok(TokenWithExpiry { token, expiry })
    }

    /// Rotate a token: revoke the old one and mint a replacement for
    /// the same subject, in a single transaction.
    ///
    /// # Errors
    ///
    /// `InvalidToken` when the presented token fails signature or
    /// expiry checks, or is already revoked.
    pub async fn refresh(&self, token: &str) -> Result<TokenWithExpiry, AppError> {
        let claims = self.checked_claims(token).await?;
        let account_id = claims.account_id().map_err(|_| AppError::InvalidToken)?;

        let (new_token, expiry) = self.codec.mint(account_id).map_err(AppError::Signing)?;

        // Ledger insert and rotation commit together or not at all.
        let mut tx = self.pool.begin().await?;
        insert_revoked(&mut tx, token, claims.expiry()).await?;
        tx.commit().await?;

        tracing::info!("Rotated token for account {}", account_id);
        Ok(TokenWithExpiry {
            token: new_token,
            expiry,
        })
    }

    /// Record a token in the revocation ledger.
    ///
    /// Cryptographic validity is required so callers cannot poison the
    /// ledger with arbitrary strings. Idempotent on repeat calls.
    pub async fn revoke(&self, token: &str) -> Result<(), AppError> {
        let claims = self.codec.verify(token).map_err(|_| AppError::InvalidToken)?;

        let mut tx = self.pool.begin().await?;
        insert_revoked(&mut tx, token, claims.expiry()).await?;
        tx.commit().await?;

        tracing::info!("Revoked token for subject {}", claims.sub);
        Ok(())
    }

    /// True iff the token is cryptographically valid, unexpired, and
    /// absent from the revocation ledger.
    pub async fn validate(&self, token: &str) -> Result<bool, AppError> {
        if self.codec.verify(token).is_err() {
            return Ok(false);
        }
        Ok(!is_revoked(&self.pool, token).await?)
    }

    /// Validate a token and return the authenticated account id.
    ///
    /// Used by the auth gate; failures surface as `Unauthenticated`.
    pub async fn authenticate(&self, token: &str) -> Result<Uuid, AppError> {
        let claims = self.checked_claims(token).await.map_err(|_| AppError::Unauthenticated)?;
        claims.account_id().map_err(|_| AppError::Unauthenticated)
    }

    /// Shared validity gate: signature + expiry + ledger.
    async fn checked_claims(&self, token: &str) -> Result<Claims, AppError> {
        let claims = self.codec.verify(token).map_err(|_| AppError::InvalidToken)?;
        if is_revoked(&self.pool, token).await? {
            return Err(AppError::InvalidToken);
        }
        Ok(claims)
    }
}
