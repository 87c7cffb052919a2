/**
 * Account HTTP Handlers
 *
 * Registration is the only public endpoint; everything else operates
 * on the authenticated caller's own account. There is no way to
 * address another account by id.
 */

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::accounts::db::Account;
use crate::accounts::service::AccountService;
use crate::error::AppError;
use crate::middleware::auth::CurrentAccount;

/// Account view returned to clients. Never carries the password hash.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AccountResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            username: account.username,
            email: account.email,
            created_at: account.created_at,
        }
    }
}

#[derive(Deserialize, Serialize, Debug)]
pub struct AccountCreateRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct UpdateEmailRequest {
    pub email: String,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct UpdateUsernameRequest {
    pub username: String,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct UpdatePasswordRequest {
    pub password: String,
}

/// POST /accounts - register a new account (public).
pub async fn create_account(
    State(accounts): State<AccountService>,
    Json(request): Json<AccountCreateRequest>,
) -> Result<(StatusCode, Json<AccountResponse>), AppError> {
    let account = accounts
        .create(&request.username, &request.email, &request.password)
        .await?;
    Ok((StatusCode::CREATED, Json(account.into())))
}

/// GET /accounts/me - the caller's own account view.
pub async fn get_me(
    State(accounts): State<AccountService>,
    caller: CurrentAccount,
) -> Result<Json<AccountResponse>, AppError> {
    let account = accounts.get_by_id(caller.id).await?;
    Ok(Json(account.into()))
}

/// PATCH /accounts/email
pub async fn update_email(
    State(accounts): State<AccountService>,
    caller: CurrentAccount,
    Json(request): Json<UpdateEmailRequest>,
) -> Result<Json<AccountResponse>, AppError> {
    let account = accounts.update_email(caller.id, &request.email).await?;
    Ok(Json(account.into()))
}

/// PATCH /accounts/username
pub async fn update_username(
    State(accounts): State<AccountService>,
    caller: CurrentAccount,
    Json(request): Json<UpdateUsernameRequest>,
) -> Result<Json<AccountResponse>, AppError> {
    let account = accounts.update_username(caller.id, &request.username).await?;
    Ok(Json(account.into()))
}

/// PATCH /accounts/password
pub async fn update_password(
    State(accounts): State<AccountService>,
    caller: CurrentAccount,
    Json(request): Json<UpdatePasswordRequest>,
) -> Result<Json<AccountResponse>, AppError> {
    let account = accounts.update_password(caller.id, &request.password).await?;
    Ok(Json(account.into()))
}

/// DELETE /accounts - self-delete, cascading to owned compositions.
pub async fn delete_account(
    State(accounts): State<AccountService>,
    caller: CurrentAccount,
) -> Result<StatusCode, AppError> {
    accounts.delete(caller.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
