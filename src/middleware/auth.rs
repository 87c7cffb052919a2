/**
 * Authentication Gate
 *
 * Per-request pipeline stage that binds a caller identity from the
 * bearer token.
 *
 * Behavior per request:
 *
 * 1. No `Authorization: Bearer` header: the request proceeds with no
 *    identity bound; protected handlers reject it via the extractor.
 * 2. A header whose token fails signature, expiry, or revocation
 *    checks: the request proceeds with no identity bound, exactly as
 *    if the header were absent. Protected handlers still reject it
 *    with 401, while the token-lifecycle handlers (refresh, logout)
 *    read the raw header themselves and report 400 InvalidToken.
 * 3. A valid token: `CurrentAccount` is inserted into the request
 *    extensions for handlers to extract.
 *
 * The gate reads state but never mutates it, and runs exactly once per
 * request.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::header::AUTHORIZATION,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::error::AppError;
use crate::server::state::AppState;

/// Request-scoped caller identity bound by the auth gate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CurrentAccount {
    pub id: Uuid,
}

/// Pull the token out of an `Authorization: Bearer <t>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .filter(|t| !t.is_empty())
}

/// Auth gate middleware, applied to the whole router.
pub async fn auth_gate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = bearer_token(request.headers()).map(str::to_owned) else {
        return next.run(request).await;
    };

    match state.auth.authenticate(&token).await {
        Ok(account_id) => {
            request
                .extensions_mut()
                .insert(CurrentAccount { id: account_id });
        }
        Err(e) => {
            // No identity bound; handlers decide what that means.
            tracing::debug!("Ignoring invalid bearer token: {}", e);
        }
    }

    next.run(request).await
}

/// Extractor handing handlers the authenticated caller.
///
/// Rejects with 401 when the gate bound no identity, i.e. the request
/// carried no bearer token or an invalid one.
impl FromRequestParts<AppState> for CurrentAccount {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentAccount>()
            .copied()
            .ok_or(AppError::Unauthenticated)
    }
}
