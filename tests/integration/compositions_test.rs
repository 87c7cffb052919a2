//! Composition CRUD and version history integration tests

use assert_matches::assert_matches;

use scriptorium::error::AppError;
use scriptorium::pagination::PageQuery;

use crate::common::{register_account, test_state};

#[tokio::test]
async fn test_create_starts_with_empty_content() {
    let (state, _pool) = test_state().await;
    let owner = register_account(&state, "margot", "margot@example.com", "correct-horse").await;

    let composition = state.compositions.create(owner, "First Draft").await.unwrap();

    assert_eq!(composition.title, "First Draft");
    assert_eq!(composition.content, "");
    assert_eq!(composition.owner_id, owner);
}

#[tokio::test]
async fn test_title_validation() {
    let (state, _pool) = test_state().await;
    let owner = register_account(&state, "margot", "margot@example.com", "correct-horse").await;

    assert_matches!(
        state.compositions.create(owner, "").await,
        Err(AppError::Validation(_))
    );
    assert_matches!(
        state.compositions.create(owner, "   ").await,
        Err(AppError::Validation(_))
    );
    assert_matches!(
        state.compositions.create(owner, &"x".repeat(256)).await,
        Err(AppError::Validation(_))
    );
}

#[tokio::test]
async fn test_every_commit_appends_one_snapshot() {
    let (state, _pool) = test_state().await;
    let owner = register_account(&state, "margot", "margot@example.com", "correct-horse").await;

    let composition = state.compositions.create(owner, "Draft").await.unwrap();
    state
        .compositions
        .update_content(owner, composition.id, "first body")
        .await
        .unwrap();
    state
        .compositions
        .update_title(owner, composition.id, "Final")
        .await
        .unwrap();

    let history = state
        .compositions
        .get_history(owner, composition.id)
        .await
        .unwrap();

    // Newest first, strictly decreasing sequence numbers.
    assert_eq!(history.len(), 3);
    assert_eq!(history[0].seq, 3);
    assert_eq!(history[1].seq, 2);
    assert_eq!(history[2].seq, 1);

    // Each snapshot captures the state after its commit.
    assert_eq!(history[0].title, "Final");
    assert_eq!(history[0].content, "first body");
    assert_eq!(history[1].title, "Draft");
    assert_eq!(history[1].content, "first body");
    assert_eq!(history[2].content, "");
}

#[tokio::test]
async fn test_history_returns_at_most_one_hundred_snapshots() {
    let (state, pool) = test_state().await;
    let owner = register_account(&state, "margot", "margot@example.com", "correct-horse").await;

    let composition = state.compositions.create(owner, "Long Running").await.unwrap();
    for revision in 0..120 {
        state
            .compositions
            .update_content(owner, composition.id, &format!("revision {revision}"))
            .await
            .unwrap();
    }

    let history = state
        .compositions
        .get_history(owner, composition.id)
        .await
        .unwrap();

    // Capped, newest first, with the head matching the live record.
    assert_eq!(history.len(), 100);
    assert_eq!(history[0].seq, 121);
    assert_eq!(history[99].seq, 22);
    let current = state
        .compositions
        .get_by_id(owner, composition.id)
        .await
        .unwrap();
    assert_eq!(history[0].content, current.content);
    assert_eq!(history[0].content, "revision 119");

    // Every commit is still on record underneath the cap.
    let total = scriptorium::compositions::versions::count_snapshots(&pool, composition.id)
        .await
        .unwrap();
    assert_eq!(total, 121);
}

#[tokio::test]
async fn test_other_account_cannot_touch_composition() {
    let (state, _pool) = test_state().await;
    let owner = register_account(&state, "margot", "margot@example.com", "correct-horse").await;
    let intruder = register_account(&state, "eve", "eve@example.com", "correct-horse").await;

    let composition = state.compositions.create(owner, "Secret").await.unwrap();

    assert_matches!(
        state.compositions.get_by_id(intruder, composition.id).await,
        Err(AppError::Unauthorized)
    );
    assert_matches!(
        state
            .compositions
            .update_title(intruder, composition.id, "Stolen")
            .await,
        Err(AppError::Unauthorized)
    );
    assert_matches!(
        state
            .compositions
            .update_content(intruder, composition.id, "graffiti")
            .await,
        Err(AppError::Unauthorized)
    );
    assert_matches!(
        state.compositions.delete(intruder, composition.id).await,
        Err(AppError::Unauthorized)
    );
    assert_matches!(
        state.compositions.get_history(intruder, composition.id).await,
        Err(AppError::Unauthorized)
    );
}

#[tokio::test]
async fn test_unknown_id_is_not_found() {
    let (state, _pool) = test_state().await;
    let owner = register_account(&state, "margot", "margot@example.com", "correct-horse").await;

    let result = state
        .compositions
        .get_by_id(owner, uuid::Uuid::new_v4())
        .await;

    assert_matches!(result, Err(AppError::NotFound { .. }));
}

#[tokio::test]
async fn test_list_ids_newest_update_first() {
    let (state, _pool) = test_state().await;
    let owner = register_account(&state, "margot", "margot@example.com", "correct-horse").await;

    let first = state.compositions.create(owner, "First").await.unwrap();
    let second = state.compositions.create(owner, "Second").await.unwrap();

    // Touching the older composition moves it to the front.
    state
        .compositions
        .update_content(owner, first.id, "revised")
        .await
        .unwrap();

    let page = state
        .compositions
        .list_owned_ids(owner, PageQuery::default())
        .await
        .unwrap();

    assert_eq!(page.total, 2);
    assert_eq!(page.items[0], first.id);
    assert_eq!(page.items[1], second.id);
}

#[tokio::test]
async fn test_list_ids_excludes_other_owners() {
    let (state, _pool) = test_state().await;
    let owner = register_account(&state, "margot", "margot@example.com", "correct-horse").await;
    let other = register_account(&state, "eve", "eve@example.com", "correct-horse").await;

    state.compositions.create(owner, "Mine").await.unwrap();
    state.compositions.create(other, "Theirs").await.unwrap();

    let page = state
        .compositions
        .list_owned_ids(owner, PageQuery::default())
        .await
        .unwrap();

    assert_eq!(page.total, 1);
    assert_eq!(page.items.len(), 1);
}

#[tokio::test]
async fn test_delete_retains_version_history_rows() {
    let (state, pool) = test_state().await;
    let owner = register_account(&state, "margot", "margot@example.com", "correct-horse").await;

    let composition = state.compositions.create(owner, "Ephemeral").await.unwrap();
    state
        .compositions
        .update_content(owner, composition.id, "body")
        .await
        .unwrap();

    state.compositions.delete(owner, composition.id).await.unwrap();

    assert_matches!(
        state.compositions.get_by_id(owner, composition.id).await,
        Err(AppError::NotFound { .. })
    );

    // Snapshots outlive the composition row.
    let snapshots =
        scriptorium::compositions::versions::count_snapshots(&pool, composition.id)
            .await
            .unwrap();
    assert_eq!(snapshots, 2);
}

#[tokio::test]
async fn test_commits_keep_index_current() {
    let (state, _pool) = test_state().await;
    let owner = register_account(&state, "margot", "margot@example.com", "correct-horse").await;

    let composition = state.compositions.create(owner, "Indexed Title").await.unwrap();
    assert_eq!(state.index.len(), 1);

    state
        .compositions
        .update_content(owner, composition.id, "fresh body text")
        .await
        .unwrap();
    assert_eq!(state.index.len(), 1);

    state.compositions.delete(owner, composition.id).await.unwrap();
    assert_eq!(state.index.len(), 0);
}
