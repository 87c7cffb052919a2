/**
 * Error to HTTP Response Conversion
 *
 * This module implements the single top-level mapping from `AppError`
 * to an HTTP response body.
 *
 * # Response Body
 *
 * With debug messages disabled (the default) the body is:
 *
 * ```json
 * { "status": 404, "error": "Not Found" }
 * ```
 *
 * With `APP_DEBUG_ERRORS=true` the body additionally carries `message`
 * and, for NotFound errors with a resource tag, `resource`.
 */

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use once_cell::sync::OnceCell;
use serde_json::{json, Value};

use super::types::AppError;

/// Whether error responses include debug detail. Set once at startup
/// from `APP_DEBUG_ERRORS`; defaults to false when never set.
static DEBUG_ERRORS: OnceCell<bool> = OnceCell::new();

/// Enable or disable debug detail in error bodies. Called once from
/// server startup; later calls are ignored.
pub fn set_debug_errors(enabled: bool) {
    let _ = DEBUG_ERRORS.set(enabled);
}

fn debug_errors() -> bool {
    *DEBUG_ERRORS.get().unwrap_or(&false)
}

/// Build the JSON error body for a status and message.
fn error_body(status: StatusCode, message: &str, resource: Option<&str>) -> Value {
    let mut body = json!({
        "status": status.as_u16(),
        "error": status.canonical_reason().unwrap_or("Unknown"),
    });

    if debug_errors() {
        body["message"] = json!(message);
        if let Some(resource) = resource {
            body["resource"] = json!(resource);
        }
    }

    body
}

/// Fallback handler for routes that match nothing.
pub async fn not_found_handler() -> AppError {
    AppError::not_found("No route matched the request path")
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Unexpected failures are logged server-side; the client only
        // ever sees the generic phrase.
        match &self {
            AppError::Storage(err) => {
                tracing::error!("Storage failure: {:?}", err);
            }
            AppError::Hashing(err) => {
                tracing::error!("Password hashing failure: {:?}", err);
            }
            AppError::Signing(err) => {
                tracing::error!("Token signing failure: {:?}", err);
            }
            other => {
                tracing::debug!("Request failed: {}", other);
            }
        }

        let resource = match &self {
            AppError::NotFound { resource, .. } => resource.as_deref(),
            _ => None,
        };

        let body = error_body(status, &self.to_string(), resource);
        (status, Json(body)).into_response()
    }
}
