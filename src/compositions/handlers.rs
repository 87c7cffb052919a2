/**
 * Composition HTTP Handlers
 *
 * Every endpoint requires an authenticated caller; ownership checks
 * live in the service layer. Title and content edits are separate
 * endpoints so each commit records exactly one field change in the
 * version history.
 */

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::compositions::db::Composition;
use crate::compositions::service::CompositionService;
use crate::compositions::versions::VersionSnapshot;
use crate::error::AppError;
use crate::middleware::auth::CurrentAccount;
use crate::pagination::{Page, PageQuery};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CompositionResponse {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    #[serde(rename = "ownerId")]
    pub owner_id: Uuid,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl From<Composition> for CompositionResponse {
    fn from(composition: Composition) -> Self {
        Self {
            id: composition.id,
            title: composition.title,
            content: composition.content,
            owner_id: composition.owner_id,
            updated_at: composition.updated_at,
        }
    }
}

#[derive(Deserialize, Serialize, Debug)]
pub struct CompositionCreateRequest {
    pub title: String,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct UpdateTitleRequest {
    pub title: String,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct UpdateContentRequest {
    pub content: String,
}

/// POST /compositions - create with a title and empty content.
pub async fn create_composition(
    State(compositions): State<CompositionService>,
    caller: CurrentAccount,
    Json(request): Json<CompositionCreateRequest>,
) -> Result<(StatusCode, Json<CompositionResponse>), AppError> {
    let composition = compositions.create(caller.id, &request.title).await?;
    Ok((StatusCode::CREATED, Json(composition.into())))
}

/// GET /compositions/{id}
pub async fn get_composition(
    State(compositions): State<CompositionService>,
    caller: CurrentAccount,
    Path(id): Path<Uuid>,
) -> Result<Json<CompositionResponse>, AppError> {
    let composition = compositions.get_by_id(caller.id, id).await?;
    Ok(Json(composition.into()))
}

/// GET /compositions/ids?page=&size= - ids of the caller's compositions,
/// most recently updated first.
pub async fn list_composition_ids(
    State(compositions): State<CompositionService>,
    caller: CurrentAccount,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<Uuid>>, AppError> {
    let page = compositions.list_owned_ids(caller.id, query).await?;
    Ok(Json(page))
}

/// PATCH /compositions/{id}/title
pub async fn update_title(
    State(compositions): State<CompositionService>,
    caller: CurrentAccount,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateTitleRequest>,
) -> Result<Json<CompositionResponse>, AppError> {
    let composition = compositions
        .update_title(caller.id, id, &request.title)
        .await?;
    Ok(Json(composition.into()))
}

/// PATCH /compositions/{id}/content
pub async fn update_content(
    State(compositions): State<CompositionService>,
    caller: CurrentAccount,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateContentRequest>,
) -> Result<Json<CompositionResponse>, AppError> {
    let composition = compositions
        .update_content(caller.id, id, &request.content)
        .await?;
    Ok(Json(composition.into()))
}

/// DELETE /compositions/{id} - version history is retained.
pub async fn delete_composition(
    State(compositions): State<CompositionService>,
    caller: CurrentAccount,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    compositions.delete(caller.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /compositions/{id}/versions - newest-first commit snapshots.
pub async fn get_versions(
    State(compositions): State<CompositionService>,
    caller: CurrentAccount,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<VersionSnapshot>>, AppError> {
    let snapshots = compositions.get_history(caller.id, id).await?;
    Ok(Json(snapshots))
}
