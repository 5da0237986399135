//! Integration tests for the configuration table.

mod common;

use common::fresh_store;

#[tokio::test]
async fn set_overwrites_value_and_flag() {
    let store = fresh_store("configuration").await;

    store
        .set_config("JWT_SECRET", Some("$2b$12$hashedsecret"), true)
        .await
        .unwrap();

    let entry = store.get_config("JWT_SECRET").await.unwrap().unwrap();
    assert_eq!(entry.value.as_deref(), Some("$2b$12$hashedsecret"));
    assert!(entry.hashed);
    assert!(!store.uses_placeholder_secret().await.unwrap());

    assert_eq!(store.list_config().await.unwrap().len(), 5);
}

#[tokio::test]
async fn new_keys_and_null_values_are_allowed() {
    let store = fresh_store("configuration").await;
    let repo = store.configuration_repo();

    repo.set("FEATURE_FLAG", None, false).await.unwrap();

    let entry = repo.get("FEATURE_FLAG").await.unwrap().unwrap();
    assert_eq!(entry.value, None);
    assert_eq!(repo.value("FEATURE_FLAG").await.unwrap(), None);
    assert_eq!(repo.list().await.unwrap().len(), 6);

    assert!(repo.delete("FEATURE_FLAG").await.unwrap());
    assert!(!repo.delete("FEATURE_FLAG").await.unwrap());
    assert!(repo.get("FEATURE_FLAG").await.unwrap().is_none());
}
