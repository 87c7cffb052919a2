/**
 * Server Initialization
 *
 * Builds the application from a validated `ServerConfig`: connects the
 * database pool, runs migrations, wires the services together, warms
 * the search index from the primary store, and spawns the cleanup
 * scheduler.
 */

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use chrono::Duration as ChronoDuration;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use crate::accounts::service::AccountService;
use crate::auth::cleanup::spawn_cleanup_scheduler;
use crate::auth::service::AuthService;
use crate::auth::tokens::TokenCodec;
use crate::compositions::service::CompositionService;
use crate::error::conversion::set_debug_errors;
use crate::routes::router::create_router;
use crate::search::index::SearchIndex;
use crate::search::service::SearchService;
use crate::server::config::ServerConfig;
use crate::server::state::AppState;

/// Connect the pool and run migrations.
pub async fn connect_database(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    tracing::info!("Connecting to database...");
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    tracing::info!("Running database migrations...");
    sqlx::migrate!().run(&pool).await?;
    tracing::info!("Database migrations completed");

    Ok(pool)
}

/// Wire services and state from a connected pool.
pub fn build_state(pool: SqlitePool, config: &ServerConfig) -> AppState {
    let index = Arc::new(SearchIndex::new());
    let codec = TokenCodec::new(
        &config.jwt_secret,
        ChronoDuration::milliseconds(config.jwt_expiration_ms),
    );

    AppState {
        auth: AuthService::new(pool.clone(), codec),
        accounts: AccountService::new(pool.clone(), index.clone(), config.bcrypt_cost),
        compositions: CompositionService::new(pool.clone(), index.clone()),
        search: SearchService::new(pool.clone(), index.clone()),
        index,
        pool,
    }
}

/// Create the fully wired application router.
///
/// Also warms the search index with the current composition table so a
/// restarted process serves search immediately, and starts the
/// revoked-token cleanup scheduler.
pub async fn create_app(config: &ServerConfig) -> Result<Router, sqlx::Error> {
    set_debug_errors(config.debug_errors);

    let pool = connect_database(&config.database_url).await?;
    let state = build_state(pool.clone(), config);

    match state.search.rebuild().await {
        Ok(count) => tracing::info!("Search index warmed with {} entries", count),
        Err(e) => tracing::error!("Search index warm-up failed: {:?}", e),
    }

    spawn_cleanup_scheduler(pool, Duration::from_secs(config.cleanup_period_secs));

    Ok(create_router(state, config.request_timeout_secs))
}
