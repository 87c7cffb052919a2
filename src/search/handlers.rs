/**
 * Search HTTP Handlers
 *
 * Query endpoints read from the in-process index and never touch the
 * database. Results are always scoped to the caller's own documents.
 */

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::middleware::auth::CurrentAccount;
use crate::pagination::{Page, PageQuery};
use crate::search::index::SearchHit;
use crate::search::service::SearchService;

#[derive(Deserialize, Serialize, Debug)]
pub struct SearchQuery {
    pub query: String,
    #[serde(default)]
    pub page: u32,
    pub size: Option<u32>,
}

impl SearchQuery {
    fn page_query(&self) -> PageQuery {
        PageQuery {
            page: self.page,
            size: self.size,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct RebuildResponse {
    pub indexed: usize,
}

/// GET /search/compositions?query= - exact term match over analyzed text.
pub async fn search_compositions(
    State(search): State<SearchService>,
    caller: CurrentAccount,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Page<SearchHit>>, AppError> {
    Ok(Json(search.search(&query.query, caller.id, query.page_query())))
}

/// GET /search/compositions/fuzzy?query= - edit-distance tolerant match.
pub async fn fuzzy_search_compositions(
    State(search): State<SearchService>,
    caller: CurrentAccount,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Page<SearchHit>>, AppError> {
    Ok(Json(
        search.fuzzy_search(&query.query, caller.id, query.page_query()),
    ))
}

/// POST /search/compositions/{id}/reindex - re-project one document
/// from its stored row, removing a stale entry if the row is gone.
pub async fn reindex_composition(
    State(search): State<SearchService>,
    _caller: CurrentAccount,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    search.reindex(id).await?;
    Ok(StatusCode::OK)
}

/// POST /search/compositions/rebuild - drop the index and replay every
/// stored composition into it.
pub async fn rebuild_index(
    State(search): State<SearchService>,
    _caller: CurrentAccount,
) -> Result<Json<RebuildResponse>, AppError> {
    let indexed = search.rebuild().await?;
    Ok(Json(RebuildResponse { indexed }))
}
