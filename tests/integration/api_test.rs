//! Full-router API tests
//!
//! Exercises the HTTP surface end to end: JSON bodies, status codes,
//! the auth gate, and the error body shape.

use axum::http::{Method, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{send_json, test_app};

#[tokio::test]
async fn test_register_login_and_me() {
    let (app, _state) = test_app().await;

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/accounts",
        None,
        Some(json!({"username": "eve", "email": "a@x", "password": "longenough"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["username"], "eve");
    assert!(body.get("password").is_none());
    assert!(body.get("passwordHash").is_none());

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({"identifier": "a@x", "password": "longenough"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().expect("token missing").to_string();
    assert!(body.get("expirationDate").is_some());

    let (status, body) = send_json(&app, Method::GET, "/accounts/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "a@x");
}

#[tokio::test]
async fn test_protected_routes_require_a_token() {
    let (app, _state) = test_app().await;

    let (status, body) = send_json(&app, Method::GET, "/compositions/ids", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["status"], 401);
    assert_eq!(body["error"], "Unauthorized");

    let (status, _body) = send_json(
        &app,
        Method::GET,
        "/compositions/ids",
        Some("not-a-real-token"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_failure_body_shape() {
    let (app, _state) = test_app().await;

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({"identifier": "ghost", "password": "whatever1"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
    assert_eq!(body["error"], "Bad Request");
    // Debug detail is off by default.
    assert!(body.get("message").is_none());
}

#[tokio::test]
async fn test_composition_lifecycle_over_http() {
    let (app, state) = test_app().await;
    let (_id, token) = crate::common::register_and_login(&state).await;

    let (status, created) = send_json(
        &app,
        Method::POST,
        "/compositions",
        Some(&token),
        Some(json!({"title": "Field Notes"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().expect("id missing").to_string();

    let (status, _body) = send_json(
        &app,
        Method::PATCH,
        &format!("/compositions/{id}/content"),
        Some(&token),
        Some(json!({"content": "day one: rain"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, fetched) = send_json(
        &app,
        Method::GET,
        &format!("/compositions/{id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["content"], "day one: rain");

    let (status, versions) = send_json(
        &app,
        Method::GET,
        &format!("/compositions/{id}/versions"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(versions.as_array().map(Vec::len), Some(2));

    let (status, body) = send_json(
        &app,
        Method::DELETE,
        &format!("/compositions/{id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn test_logout_invalidates_the_token() {
    let (app, state) = test_app().await;
    let (_id, token) = crate::common::register_and_login(&state).await;

    let (status, _body) = send_json(&app, Method::POST, "/auth/logout", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    // Logging out twice is harmless; the ledger insert is a no-op.
    let (status, _body) = send_json(&app, Method::POST, "/auth/logout", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _body) = send_json(&app, Method::GET, "/accounts/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_rejects_rotated_token_with_400() {
    let (app, state) = test_app().await;
    let (_id, token) = crate::common::register_and_login(&state).await;

    let (status, rotated) = send_json(&app, Method::POST, "/auth/refresh", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(rotated["token"].as_str().is_some());

    // The old token landed in the revocation ledger; presenting it to
    // refresh again is a bad request, not a missing identity.
    let (status, body) = send_json(&app, Method::POST, "/auth/refresh", Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
    assert_eq!(body["error"], "Bad Request");

    // Protected routes still see it as no identity at all.
    let (status, _body) = send_json(&app, Method::GET, "/accounts/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_search_endpoints_over_http() {
    let (app, state) = test_app().await;
    let (_id, token) = crate::common::register_and_login(&state).await;

    send_json(
        &app,
        Method::POST,
        "/compositions",
        Some(&token),
        Some(json!({"title": "International Cooking"})),
    )
    .await;

    let (status, page) = send_json(
        &app,
        Method::GET,
        "/search/compositions?query=international",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 1);

    let (status, page) = send_json(
        &app,
        Method::GET,
        "/search/compositions/fuzzy?query=internationl",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 1);

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/search/compositions/rebuild",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["indexed"], 1);
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let (app, _state) = test_app().await;

    let (status, body) = send_json(&app, Method::GET, "/nope", None, None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);
    assert_eq!(body["error"], "Not Found");
}
