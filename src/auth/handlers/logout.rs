/**
 * Logout Handler
 *
 * POST /auth/logout
 *
 * Revokes the presented bearer token. The token stays in the
 * revocation ledger until its natural expiry, after which the cleanup
 * scheduler prunes it. Logging out twice is harmless.
 */

use axum::{extract::State, http::HeaderMap, http::StatusCode};

use crate::auth::service::AuthService;
use crate::error::AppError;
use crate::middleware::auth::bearer_token;

pub async fn logout(
    State(auth): State<AuthService>,
    headers: HeaderMap,
) -> Result<StatusCode, AppError> {
    let token = bearer_token(&headers).ok_or(AppError::InvalidToken)?;
    auth.revoke(token).await?;
    Ok(StatusCode::OK)
}
