/**
 * Login Handler
 *
 * POST /auth/login
 *
 * Verifies an identifier/password pair and returns a fresh bearer
 * token with its expiry.
 *
 * # Security
 *
 * Unknown identifiers and wrong passwords both return the same 400
 * InvalidCredentials body, so the endpoint cannot be used to enumerate
 * registered accounts. Password verification is constant-time with
 * respect to the hash comparison (bcrypt).
 */

use axum::{extract::State, response::Json};

use crate::auth::handlers::types::{LoginRequest, LoginResponse};
use crate::auth::service::AuthService;
use crate::error::AppError;

pub async fn login(
    State(auth): State<AuthService>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let issued = auth.issue(&request.identifier, &request.password).await?;

    Ok(Json(LoginResponse {
        token: issued.token,
        expiration_date: issued.expiry,
    }))
}
