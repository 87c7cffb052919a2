/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Route Order
 *
 * Routes are added in a specific order:
 * 1. Auth routes (login, refresh, logout)
 * 2. Account routes (registration, self-service updates)
 * 3. Composition routes (CRUD, version history)
 * 4. Search routes (exact, fuzzy, reindex, rebuild)
 * 5. Fallback handler (404)
 *
 * The auth gate middleware runs on every request: requests without an
 * Authorization header pass through unauthenticated, requests with an
 * invalid bearer token are rejected before any handler runs.
 */

use axum::{
    middleware,
    routing::{delete, get, patch, post},
    Router,
};
use std::time::Duration;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::middleware::auth::auth_gate;
use crate::server::state::AppState;
use crate::{accounts, auth, compositions, search};

/// Create the Axum router with all routes configured.
///
/// # Arguments
///
/// * `state` - Application state containing the pool and services
/// * `request_timeout_secs` - Per-request timeout applied to all routes
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub fn create_router(state: AppState, request_timeout_secs: u64) -> Router<()> {
    let auth_routes = Router::new()
        .route("/auth/login", post(auth::handlers::login))
        .route("/auth/refresh", post(auth::handlers::refresh))
        .route("/auth/logout", post(auth::handlers::logout));

    let account_routes = Router::new()
        .route("/accounts", post(accounts::handlers::create_account))
        .route("/accounts", delete(accounts::handlers::delete_account))
        .route("/accounts/me", get(accounts::handlers::get_me))
        .route("/accounts/email", patch(accounts::handlers::update_email))
        .route(
            "/accounts/username",
            patch(accounts::handlers::update_username),
        )
        .route(
            "/accounts/password",
            patch(accounts::handlers::update_password),
        );

    let composition_routes = Router::new()
        .route(
            "/compositions",
            post(compositions::handlers::create_composition),
        )
        .route(
            "/compositions/ids",
            get(compositions::handlers::list_composition_ids),
        )
        .route(
            "/compositions/{id}",
            get(compositions::handlers::get_composition),
        )
        .route(
            "/compositions/{id}",
            delete(compositions::handlers::delete_composition),
        )
        .route(
            "/compositions/{id}/title",
            patch(compositions::handlers::update_title),
        )
        .route(
            "/compositions/{id}/content",
            patch(compositions::handlers::update_content),
        )
        .route(
            "/compositions/{id}/versions",
            get(compositions::handlers::get_versions),
        );

    let search_routes = Router::new()
        .route(
            "/search/compositions",
            get(search::handlers::search_compositions),
        )
        .route(
            "/search/compositions/fuzzy",
            get(search::handlers::fuzzy_search_compositions),
        )
        .route(
            "/search/compositions/{id}/reindex",
            post(search::handlers::reindex_composition),
        )
        .route(
            "/search/compositions/rebuild",
            post(search::handlers::rebuild_index),
        );

    Router::new()
        .merge(auth_routes)
        .merge(account_routes)
        .merge(composition_routes)
        .merge(search_routes)
        .fallback(crate::error::not_found_handler)
        .layer(middleware::from_fn_with_state(state.clone(), auth_gate))
        .layer(TimeoutLayer::new(Duration::from_secs(request_timeout_secs)))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
