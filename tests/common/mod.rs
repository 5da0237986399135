#![allow(dead_code)]

use authbase::db::{NewUser, Store};
use authbase::entities::user_simple;

pub async fn fresh_store(label: &str) -> Store {
    let db_path = std::env::temp_dir().join(format!(
        "authbase-{label}-test-{}.db",
        uuid::Uuid::new_v4()
    ));

    Store::new(&format!("sqlite:{}", db_path.display()))
        .await
        .expect("failed to open test database")
}

pub fn new_user(email: &str, phone: Option<&str>) -> NewUser {
    NewUser {
        email: email.to_string(),
        first_name: "Test".to_string(),
        last_name: Some("User".to_string()),
        phone: phone.map(str::to_string),
    }
}

pub async fn add_user(store: &Store, email: &str) -> user_simple::Model {
    store
        .add_user(new_user(email, None))
        .await
        .expect("failed to add user")
}
