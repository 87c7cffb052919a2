/**
 * Refresh Handler
 *
 * POST /auth/refresh
 *
 * Rotates the presented bearer token: the old token is revoked and a
 * replacement for the same account is returned. Presenting the old
 * token again afterwards fails with 400 InvalidToken.
 */

use axum::{extract::State, http::HeaderMap, response::Json};

use crate::auth::handlers::types::LoginResponse;
use crate::auth::service::AuthService;
use crate::error::AppError;
use crate::middleware::auth::bearer_token;

pub async fn refresh(
    State(auth): State<AuthService>,
    headers: HeaderMap,
) -> Result<Json<LoginResponse>, AppError> {
    let token = bearer_token(&headers).ok_or(AppError::InvalidToken)?;
    let rotated = auth.refresh(token).await?;

    Ok(Json(LoginResponse {
        token: rotated.token,
        expiration_date: rotated.expiry,
    }))
}
