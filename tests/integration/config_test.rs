//! Configuration loading tests
//!
//! These mutate process environment variables, so they are serialized.

use assert_matches::assert_matches;
use serial_test::serial;

use scriptorium::server::config::{ConfigError, ServerConfig};

fn clear_app_env() {
    for name in [
        "APP_JWT_SECRET",
        "APP_JWT_EXPIRATION_MS",
        "APP_BCRYPT_COST",
        "APP_CLEANUP_PERIOD_SECS",
        "APP_REQUEST_TIMEOUT_SECS",
        "APP_DEBUG_ERRORS",
        "DATABASE_URL",
        "SERVER_PORT",
    ] {
        std::env::remove_var(name);
    }
}

// 32 zero bytes, base64-encoded.
const TEST_SECRET: &str = "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA=";

#[test]
#[serial]
fn test_missing_jwt_secret_is_fatal() {
    clear_app_env();

    let result = ServerConfig::from_env();

    assert_matches!(result, Err(ConfigError::MissingJwtSecret));
}

#[test]
#[serial]
fn test_short_jwt_secret_is_fatal() {
    clear_app_env();
    std::env::set_var("APP_JWT_SECRET", "c2hvcnQ=");

    let result = ServerConfig::from_env();

    assert_matches!(result, Err(ConfigError::JwtSecretTooShort { actual: 5 }));
}

#[test]
#[serial]
fn test_defaults_applied() {
    clear_app_env();
    std::env::set_var("APP_JWT_SECRET", TEST_SECRET);

    let config = ServerConfig::from_env().unwrap();

    assert_eq!(config.jwt_secret.len(), 32);
    assert_eq!(config.jwt_expiration_ms, 86_400_000);
    assert_eq!(config.cleanup_period_secs, 3_600);
    assert_eq!(config.request_timeout_secs, 30);
    assert_eq!(config.port, 3000);
    assert!(!config.debug_errors);
    assert_eq!(config.database_url, "sqlite:scriptorium.db?mode=rwc");
}

#[test]
#[serial]
fn test_overrides_win_over_defaults() {
    clear_app_env();
    std::env::set_var("APP_JWT_SECRET", TEST_SECRET);
    std::env::set_var("APP_JWT_EXPIRATION_MS", "60000");
    std::env::set_var("SERVER_PORT", "8080");
    std::env::set_var("APP_DEBUG_ERRORS", "true");
    std::env::set_var("DATABASE_URL", "sqlite::memory:");

    let config = ServerConfig::from_env().unwrap();

    assert_eq!(config.jwt_expiration_ms, 60_000);
    assert_eq!(config.port, 8080);
    assert!(config.debug_errors);
    assert_eq!(config.database_url, "sqlite::memory:");

    clear_app_env();
}

#[test]
#[serial]
fn test_malformed_number_is_fatal() {
    clear_app_env();
    std::env::set_var("APP_JWT_SECRET", TEST_SECRET);
    std::env::set_var("SERVER_PORT", "not-a-port");

    let result = ServerConfig::from_env();

    assert_matches!(result, Err(ConfigError::MalformedValue { .. }));
    clear_app_env();
}
