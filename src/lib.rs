/**
 * Scriptorium - multi-tenant composition authoring backend
 *
 * A JSON HTTP service for authoring "compositions" (titled text
 * documents) with account management, bearer-token authentication,
 * per-commit version history, and in-process full-text search.
 *
 * # Module Layout
 *
 * - `server` - configuration, shared state, startup wiring
 * - `routes` - Axum router assembly
 * - `middleware` - request-level auth gate
 * - `auth` - token minting, verification, revocation ledger, cleanup
 * - `accounts` - registration and self-service account management
 * - `compositions` - document CRUD with transactional version history
 * - `search` - text analysis, inverted index, projection, queries
 * - `error` - failure taxonomy and HTTP conversion
 */

pub mod accounts;
pub mod auth;
pub mod compositions;
pub mod error;
pub mod middleware;
pub mod pagination;
pub mod routes;
pub mod search;
pub mod server;
