/**
 * Auth Handler Types
 *
 * Request and response bodies shared by the login, refresh, and logout
 * handlers.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Login request
///
/// The identifier may be either an email address or a username; it is
/// matched against both, email first.
#[derive(Deserialize, Serialize, Debug)]
pub struct LoginRequest {
    pub identifier: String,
    pub password: String,
}

/// Token response returned by login and refresh
#[derive(Serialize, Deserialize, Debug)]
pub struct LoginResponse {
    pub token: String,
    #[serde(rename = "expirationDate")]
    pub expiration_date: DateTime<Utc>,
}
