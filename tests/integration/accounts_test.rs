//! Account management integration tests

use assert_matches::assert_matches;

use scriptorium::error::AppError;

use crate::common::{register_account, test_state};

#[tokio::test]
async fn test_create_account_hashes_password() {
    let (state, _pool) = test_state().await;

    let account = state
        .accounts
        .create("margot", "margot@example.com", "correct-horse")
        .await
        .unwrap();

    assert_eq!(account.username, "margot");
    assert_ne!(account.password_hash, "correct-horse");
    assert!(account.password_hash.starts_with("$2"));
}

#[tokio::test]
async fn test_minimal_email_accepted() {
    let (state, _pool) = test_state().await;

    let account = state.accounts.create("eve", "a@x", "longenough").await;

    assert!(account.is_ok());
}

#[tokio::test]
async fn test_rejects_malformed_email() {
    let (state, _pool) = test_state().await;

    for email in ["no-at-sign", "@missing-local", "missing-domain@", "two@@ats"] {
        let result = state.accounts.create("eve", email, "longenough").await;
        assert_matches!(result, Err(AppError::Validation(_)), "email: {email}");
    }
}

#[tokio::test]
async fn test_rejects_short_password_and_username() {
    let (state, _pool) = test_state().await;

    assert_matches!(
        state.accounts.create("ab", "a@x", "longenough").await,
        Err(AppError::Validation(_))
    );
    assert_matches!(
        state.accounts.create("valid", "a@x", "short").await,
        Err(AppError::Validation(_))
    );
}

#[tokio::test]
async fn test_duplicate_username_and_email_conflict() {
    let (state, _pool) = test_state().await;
    register_account(&state, "margot", "margot@example.com", "correct-horse").await;

    let same_username = state
        .accounts
        .create("margot", "other@example.com", "longenough")
        .await;
    let same_email = state
        .accounts
        .create("other", "margot@example.com", "longenough")
        .await;

    assert_matches!(same_username, Err(AppError::Conflict(_)));
    assert_matches!(same_email, Err(AppError::Conflict(_)));
}

#[tokio::test]
async fn test_update_email_rejects_taken_address() {
    let (state, _pool) = test_state().await;
    let id = register_account(&state, "margot", "margot@example.com", "correct-horse").await;
    register_account(&state, "other", "other@example.com", "correct-horse").await;

    let result = state.accounts.update_email(id, "other@example.com").await;

    assert_matches!(result, Err(AppError::Conflict(_)));
}

#[tokio::test]
async fn test_update_password_allows_new_login() {
    let (state, _pool) = test_state().await;
    let id = register_account(&state, "margot", "margot@example.com", "correct-horse").await;

    state
        .accounts
        .update_password(id, "battery-staple")
        .await
        .unwrap();

    assert!(state.auth.issue("margot", "battery-staple").await.is_ok());
    assert_matches!(
        state.auth.issue("margot", "correct-horse").await,
        Err(AppError::InvalidCredentials)
    );
}

#[tokio::test]
async fn test_delete_cascades_to_compositions_and_index() {
    let (state, _pool) = test_state().await;
    let id = register_account(&state, "margot", "margot@example.com", "correct-horse").await;

    let composition = state
        .compositions
        .create(id, "Relational Databases")
        .await
        .unwrap();
    assert_eq!(state.index.len(), 1);

    state.accounts.delete(id).await.unwrap();

    assert_matches!(
        state.accounts.get_by_id(id).await,
        Err(AppError::NotFound { .. })
    );
    assert_matches!(
        state.compositions.get_by_id(id, composition.id).await,
        Err(AppError::NotFound { .. })
    );
    assert_eq!(state.index.len(), 0);
}
