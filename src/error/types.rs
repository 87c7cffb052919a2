/**
 * Backend Error Types
 *
 * This module defines the error taxonomy shared by all services. Each
 * variant maps to exactly one HTTP status code; the mapping lives in
 * `conversion.rs`.
 *
 * # Taxonomy
 *
 * - `Validation` - malformed input caught before persistence (400)
 * - `InvalidCredentials` / `InvalidToken` - authentication inputs failed;
 *   the messages are deliberately uninformative (400)
 * - `Unauthenticated` - no valid identity bound to the request (401)
 * - `Unauthorized` - identity exists but does not own the resource (401)
 * - `NotFound` - target resource does not exist (404)
 * - `Conflict` - unique-constraint violation (409)
 * - `Storage` - unexpected I/O or invariant violation (500)
 * - `Signing` - token minting failed inside the codec (500)
 */

use axum::http::StatusCode;
use thiserror::Error;

/// Application-wide error type
///
/// Services raise these; handlers return them; the `IntoResponse`
/// implementation in `conversion.rs` turns them into JSON error bodies.
#[derive(Debug, Error)]
pub enum AppError {
    /// Input failed validation before touching the store
    #[error("{0}")]
    Validation(String),

    /// Login failed; never distinguishes unknown user from wrong password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Token failed signature, expiry, or revocation checks
    #[error("Invalid token")]
    InvalidToken,

    /// No identity bound to the request
    #[error("User not authenticated")]
    Unauthenticated,

    /// Caller is authenticated but does not own the target resource
    #[error("Not authorized")]
    Unauthorized,

    /// Target resource does not exist
    #[error("{message}")]
    NotFound {
        message: String,
        /// Optional resource tag surfaced only in debug error bodies
        resource: Option<String>,
    },

    /// Unique-constraint violation on create or update
    #[error("{0}")]
    Conflict(String),

    /// Unexpected database failure
    #[error("Storage failure")]
    Storage(#[from] sqlx::Error),

    /// Password hashing failure
    #[error("Password hashing failure")]
    Hashing(#[from] bcrypt::BcryptError),

    /// Token signing failure while minting; never caused by the caller
    #[error("Token signing failure")]
    Signing(jsonwebtoken::errors::Error),
}

impl AppError {
    /// Shorthand for a `NotFound` without a resource tag
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            resource: None,
        }
    }

    /// `NotFound` carrying a resource tag for debug error bodies
    pub fn not_found_resource(message: impl Into<String>, resource: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            resource: Some(resource.into()),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials => StatusCode::BAD_REQUEST,
            Self::InvalidToken => StatusCode::BAD_REQUEST,
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Storage(_) | Self::Hashing(_) | Self::Signing(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Map a sqlx error to `Conflict` when it is a unique-constraint
/// violation, otherwise pass it through as `Storage`.
pub fn map_unique_violation(err: sqlx::Error, conflict_message: &str) -> AppError {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.is_unique_violation() {
            return AppError::Conflict(conflict_message.to_string());
        }
    }
    AppError::Storage(err)
}
