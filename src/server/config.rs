/**
 * Server Configuration
 *
 * Loads and validates configuration from environment variables (a
 * `.env` file is read into the environment by `main` before this
 * runs).
 *
 * # Startup-Fatal Checks
 *
 * A missing `APP_JWT_SECRET`, a value that is not valid base64, or a
 * decoded key shorter than 32 bytes aborts startup. Everything else
 * has a sensible default for local development.
 */

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use thiserror::Error;

/// Minimum signing key length: 256 bits.
pub const MIN_JWT_SECRET_BYTES: usize = 32;

const DEFAULT_JWT_EXPIRATION_MS: i64 = 86_400_000;
const DEFAULT_CLEANUP_PERIOD_SECS: u64 = 3_600;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("APP_JWT_SECRET is not set")]
    MissingJwtSecret,

    #[error("APP_JWT_SECRET is not valid base64: {0}")]
    MalformedJwtSecret(#[from] base64::DecodeError),

    #[error("APP_JWT_SECRET decodes to {actual} bytes; at least {MIN_JWT_SECRET_BYTES} required")]
    JwtSecretTooShort { actual: usize },

    #[error("{name} is not a valid {kind}: {value}")]
    MalformedValue {
        name: &'static str,
        kind: &'static str,
        value: String,
    },
}

/// Validated server configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    /// Decoded signing key, read-only after startup
    pub jwt_secret: Vec<u8>,
    pub jwt_expiration_ms: i64,
    pub bcrypt_cost: u32,
    pub cleanup_period_secs: u64,
    pub request_timeout_secs: u64,
    pub debug_errors: bool,
    pub port: u16,
}

impl ServerConfig {
    /// Load configuration from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let jwt_secret = decode_jwt_secret(
            &std::env::var("APP_JWT_SECRET").map_err(|_| ConfigError::MissingJwtSecret)?,
        )?;

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite:scriptorium.db?mode=rwc".to_string());

        Ok(Self {
            database_url,
            jwt_secret,
            jwt_expiration_ms: parse_env("APP_JWT_EXPIRATION_MS", DEFAULT_JWT_EXPIRATION_MS)?,
            bcrypt_cost: parse_env("APP_BCRYPT_COST", bcrypt::DEFAULT_COST)?,
            cleanup_period_secs: parse_env("APP_CLEANUP_PERIOD_SECS", DEFAULT_CLEANUP_PERIOD_SECS)?,
            request_timeout_secs: parse_env(
                "APP_REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )?,
            debug_errors: std::env::var("APP_DEBUG_ERRORS")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
            port: parse_env("SERVER_PORT", DEFAULT_PORT)?,
        })
    }
}

/// Decode and length-check the signing key.
pub fn decode_jwt_secret(encoded: &str) -> Result<Vec<u8>, ConfigError> {
    if encoded.trim().is_empty() {
        return Err(ConfigError::MissingJwtSecret);
    }

    let secret = BASE64.decode(encoded.trim())?;
    if secret.len() < MIN_JWT_SECRET_BYTES {
        return Err(ConfigError::JwtSecretTooShort {
            actual: secret.len(),
        });
    }
    Ok(secret)
}

fn parse_env<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value.parse().map_err(|_| ConfigError::MalformedValue {
            name,
            kind: "number",
            value,
        }),
        Err(_) => Ok(default),
    }
}
