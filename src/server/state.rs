/**
 * Application State
 *
 * Central state container shared by every worker. Holds the database
 * pool, the four services, and the search index. All fields are cheap
 * to clone: services carry the pool by handle and the index by `Arc`.
 *
 * `FromRef` implementations let handlers extract just the piece of
 * state they need, following the axum pattern.
 */

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::accounts::service::AccountService;
use crate::auth::service::AuthService;
use crate::compositions::service::CompositionService;
use crate::search::index::SearchIndex;
use crate::search::service::SearchService;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub auth: AuthService,
    pub accounts: AccountService,
    pub compositions: CompositionService,
    pub search: SearchService,
    pub index: Arc<SearchIndex>,
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}

impl FromRef<AppState> for AuthService {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}

impl FromRef<AppState> for AccountService {
    fn from_ref(state: &AppState) -> Self {
        state.accounts.clone()
    }
}

impl FromRef<AppState> for CompositionService {
    fn from_ref(state: &AppState) -> Self {
        state.compositions.clone()
    }
}

impl FromRef<AppState> for SearchService {
    fn from_ref(state: &AppState) -> Self {
        state.search.clone()
    }
}
