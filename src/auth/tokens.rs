/**
 * Signed Bearer Tokens
 *
 * This module implements the token codec: minting and verifying the
 * HS256-signed tokens that carry an account id and expiry instant.
 *
 * # Token Format
 *
 * Standard JWT with three claims: `sub` (account id), `iat` and `exp`
 * (Unix timestamps). The signing key is symmetric and must be at least
 * 256 bits; key validation happens at startup in `server::config`.
 *
 * # Clock Handling
 *
 * Expiry is wall-clock. Verification runs with zero leeway: a token is
 * invalid the instant its expiry passes.
 */

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Account id as a string
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Account id parsed out of the subject claim.
    pub fn account_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }

    /// The token's natural expiry as a wall-clock instant.
    pub fn expiry(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }
}

/// Token codec holding the signing key and configured TTL.
///
/// The key is read-only after startup; the codec is cheap to clone and
/// shared across workers inside `AppState`.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenCodec {
    /// Build a codec from raw secret bytes and a token TTL.
    ///
    /// Key length is validated upstream in `ServerConfig::from_env`;
    /// this constructor assumes the secret already passed the check.
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    /// Mint a token for an account.
    ///
    /// # Returns
    ///
    /// The encoded token and its expiry instant (`now + TTL`).
    pub fn mint(
        &self,
        account_id: Uuid,
    ) -> Result<(String, DateTime<Utc>), jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let expiry = now + self.ttl;

        let claims = Claims {
            sub: account_id.to_string(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)?;
        Ok((token, expiry))
    }

    /// Verify a token's signature and expiry, returning its claims.
    ///
    /// No clock skew is tolerated: `leeway` is pinned to zero, so an
    /// expired token fails the moment `exp` is in the past.
    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)?;
        Ok(token_data.claims)
    }
}
