//! Integration tests for the user repository.

mod common;

use common::{add_user, fresh_store};

#[tokio::test]
async fn users_are_found_by_email_and_surrogate_id() {
    let store = fresh_store("user").await;
    let created = add_user(&store, "find@example.com").await;
    let repo = store.user_repo();

    let by_id = repo.get_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(by_id.email, "find@example.com");
    assert_eq!(by_id.first_name, "Test");

    assert!(repo.get_by_id(uuid::Uuid::new_v4()).await.unwrap().is_none());
    assert!(repo.get_by_email("other@example.com").await.unwrap().is_none());
}

#[tokio::test]
async fn update_names_stamps_updated_at() {
    let store = fresh_store("user").await;
    let created = add_user(&store, "rename@example.com").await;
    assert!(created.updated_at.is_none());

    let updated = store
        .user_repo()
        .update_names("rename@example.com", "Ada", None)
        .await
        .unwrap();

    assert_eq!(updated.first_name, "Ada");
    assert_eq!(updated.last_name, None);
    assert_eq!(updated.id, created.id);
    assert!(updated.updated_at.is_some());
}

#[tokio::test]
async fn tokens_can_be_cleared_per_user() {
    let store = fresh_store("user").await;
    let user = add_user(&store, "tokens@example.com").await;
    let tokens = store.reset_token_repo();

    tokens.issue(user.id, "abc").await.unwrap();
    assert_eq!(tokens.delete_for_user(user.id).await.unwrap(), 1);
    assert_eq!(tokens.delete_for_user(user.id).await.unwrap(), 0);
    assert!(tokens.consume("abc").await.unwrap().is_none());
}

#[tokio::test]
async fn deleting_unknown_user_reports_nothing_removed() {
    let store = fresh_store("user").await;
    assert!(
        !store
            .user_repo()
            .delete_by_email("ghost@example.com")
            .await
            .unwrap()
    );
}
