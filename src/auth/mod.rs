/**
 * Authentication and the session-token lifecycle
 *
 * - `tokens` - the signed-token codec (mint / verify)
 * - `service` - login, refresh, revoke, validate
 * - `revoked` - the revocation ledger
 * - `cleanup` - periodic pruning of expired ledger entries
 * - `handlers` - the HTTP surface
 */

pub mod cleanup;
pub mod handlers;
pub mod revoked;
pub mod service;
pub mod tokens;
