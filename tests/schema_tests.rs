//! Integration tests for the initial schema: tables, seed rows and constraints.

mod common;

use authbase::constants::{SCHEMA_TABLES, seed};
use authbase::entities::{
    authorization_permission, authorization_role_permission, authorization_role_user, prelude::*,
};
use common::{add_user, fresh_store, new_user};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, Set,
    Statement, Value,
};
use sea_orm_migration::SchemaManager;

#[tokio::test]
async fn apply_creates_every_table() {
    let store = fresh_store("schema").await;
    let manager = SchemaManager::new(&store.conn);

    for table in SCHEMA_TABLES {
        assert!(manager.has_table(*table).await.unwrap(), "missing {table}");
    }
}

async fn raw_insert(store: &authbase::db::Store, sql: &str, values: Vec<Value>) -> bool {
    let backend = store.conn.get_database_backend();
    store
        .conn
        .execute(Statement::from_sql_and_values(backend, sql, values))
        .await
        .is_ok()
}

fn assert_recent(at: chrono::DateTime<chrono::Utc>) {
    let age = chrono::Utc::now() - at;
    assert!(age.num_minutes().abs() < 5, "timestamp {at} is not current");
}

#[tokio::test]
async fn configuration_hashed_defaults_to_false() {
    let store = fresh_store("schema").await;

    store
        .conn
        .execute_unprepared("INSERT INTO configuration (key) VALUES ('EXTRA')")
        .await
        .unwrap();

    let entry = Configuration::find_by_id("EXTRA".to_string())
        .one(&store.conn)
        .await
        .unwrap()
        .unwrap();
    assert!(!entry.hashed);
    assert!(entry.value.is_none());
}

#[tokio::test]
async fn created_at_defaults_to_current_time() {
    let store = fresh_store("schema").await;
    let user_id = uuid::Uuid::new_v4();

    assert!(
        raw_insert(
            &store,
            "INSERT INTO user_simple (id, first_name, email) VALUES (?, ?, ?)",
            vec![user_id.into(), "Raw".into(), "raw@example.com".into()],
        )
        .await
    );
    assert!(
        raw_insert(
            &store,
            "INSERT INTO authentication_user_password (id, user_id, password) VALUES (?, ?, ?)",
            vec![uuid::Uuid::new_v4().into(), user_id.into(), "$2b$12$raw".into()],
        )
        .await
    );
    assert!(
        raw_insert(
            &store,
            "INSERT INTO authentication_reset_password_token (token, user_id) VALUES (?, ?)",
            vec!["raw-token".into(), user_id.into()],
        )
        .await
    );

    let user = store.get_user("raw@example.com").await.unwrap().unwrap();
    assert_eq!(user.id, user_id);
    assert_recent(user.created_at);
    assert!(user.updated_at.is_none());

    let password = store.password_repo().get_for_user(user_id).await.unwrap().unwrap();
    assert_recent(password.created_at);
    assert!(password.previous_password.is_none());

    let token = store.reset_token_repo().find("raw-token").await.unwrap().unwrap();
    assert_recent(token.created_at);
}

#[tokio::test]
async fn permission_type_column_is_named_type() {
    let store = fresh_store("schema").await;
    let backend = store.conn.get_database_backend();

    let row = store
        .conn
        .query_one(Statement::from_string(
            backend,
            r#"SELECT COUNT(*) AS n FROM authorization_permission WHERE "type" = 'read'"#,
        ))
        .await
        .unwrap()
        .unwrap();
    let reads: i64 = row.try_get("", "n").unwrap();

    let expected = seed::PERMISSIONS.iter().filter(|(_, t)| *t == "read").count();
    assert_eq!(reads, i64::try_from(expected).unwrap());
}

#[tokio::test]
async fn one_password_row_per_user() {
    let store = fresh_store("schema").await;
    let user = add_user(&store, "single@example.com").await;

    store
        .password_repo()
        .set_password(user.id, "$2b$12$first")
        .await
        .unwrap();

    assert!(
        !raw_insert(
            &store,
            "INSERT INTO authentication_user_password (id, user_id, password) VALUES (?, ?, ?)",
            vec![uuid::Uuid::new_v4().into(), user.id.into(), "$2b$12$second".into()],
        )
        .await
    );
    assert_eq!(UserPassword::find().count(&store.conn).await.unwrap(), 1);
}

#[tokio::test]
async fn one_reset_token_per_user() {
    let store = fresh_store("schema").await;
    let user = add_user(&store, "onetoken@example.com").await;

    store.reset_token_repo().issue(user.id, "token-a").await.unwrap();

    assert!(
        !raw_insert(
            &store,
            "INSERT INTO authentication_reset_password_token (token, user_id) VALUES (?, ?)",
            vec!["token-b".into(), user.id.into()],
        )
        .await
    );
    assert_eq!(ResetPasswordToken::find().count(&store.conn).await.unwrap(), 1);
}

#[tokio::test]
async fn revert_drops_every_table() {
    let store = fresh_store("schema").await;
    store.revert_migrations().await.unwrap();

    let manager = SchemaManager::new(&store.conn);
    for table in SCHEMA_TABLES {
        assert!(!manager.has_table(*table).await.unwrap(), "left {table}");
    }

    // And the schema can be rebuilt afterwards.
    store.apply_migrations().await.unwrap();
    assert_eq!(Permission::find().count(&store.conn).await.unwrap(), 10);
}

#[tokio::test]
async fn seeds_exactly_the_listed_permissions() {
    let store = fresh_store("schema").await;

    let mut seeded: Vec<(String, String)> = store
        .list_permissions()
        .await
        .unwrap()
        .into_iter()
        .map(|p| (p.name, p.access_type))
        .collect();
    seeded.sort();

    let mut expected: Vec<(String, String)> = seed::PERMISSIONS
        .iter()
        .map(|(n, t)| ((*n).to_string(), (*t).to_string()))
        .collect();
    expected.sort();

    assert_eq!(seeded, expected);
}

#[tokio::test]
async fn seeds_admin_with_every_permission() {
    let store = fresh_store("schema").await;

    let roles = store.list_roles().await.unwrap();
    assert_eq!(roles.len(), 1);
    assert_eq!(roles[0].name, "ADMIN");

    let links = RolePermission::find().all(&store.conn).await.unwrap();
    assert_eq!(links.len(), 10);
    assert!(links.iter().all(|l| l.role_id == roles[0].id));

    let mut linked: Vec<_> = links.iter().map(|l| l.permission_id).collect();
    linked.sort();
    linked.dedup();
    assert_eq!(linked.len(), 10);
}

#[tokio::test]
async fn seeds_configuration_defaults() {
    let store = fresh_store("schema").await;

    let entries = store.list_config().await.unwrap();
    assert_eq!(entries.len(), 5);

    for (key, value) in seed::CONFIGURATION {
        let entry = entries
            .iter()
            .find(|e| e.key == *key)
            .unwrap_or_else(|| panic!("missing {key}"));
        assert_eq!(entry.value.as_deref(), Some(*value));
        assert!(!entry.hashed);
    }

    let secret = store.get_config("JWT_SECRET").await.unwrap().unwrap();
    assert_eq!(secret.value.as_deref(), Some("change me in production"));
    assert!(store.uses_placeholder_secret().await.unwrap());
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let store = fresh_store("schema").await;

    store.add_user(new_user("a@example.com", None)).await.unwrap();
    assert!(store.add_user(new_user("a@example.com", None)).await.is_err());
}

#[tokio::test]
async fn phone_is_unique_but_optional() {
    let store = fresh_store("schema").await;

    store
        .add_user(new_user("a@example.com", Some("+100")))
        .await
        .unwrap();
    assert!(
        store
            .add_user(new_user("b@example.com", Some("+100")))
            .await
            .is_err()
    );

    store.add_user(new_user("c@example.com", None)).await.unwrap();
    store.add_user(new_user("d@example.com", None)).await.unwrap();
    assert_eq!(store.list_users().await.unwrap().len(), 3);
}

#[tokio::test]
async fn permission_identity_is_name_and_type() {
    let store = fresh_store("schema").await;

    let duplicate = authorization_permission::ActiveModel {
        id: Set(uuid::Uuid::new_v4()),
        name: Set("users".to_string()),
        access_type: Set("read".to_string()),
        description: Set(None),
    };
    assert!(Permission::insert(duplicate).exec(&store.conn).await.is_err());

    let new_type = authorization_permission::ActiveModel {
        id: Set(uuid::Uuid::new_v4()),
        name: Set("users".to_string()),
        access_type: Set("delete".to_string()),
        description: Set(Some("Remove accounts".to_string())),
    };
    Permission::insert(new_type)
        .exec_without_returning(&store.conn)
        .await
        .unwrap();

    assert_eq!(Permission::find().count(&store.conn).await.unwrap(), 11);
}

#[tokio::test]
async fn role_user_requires_existing_parents() {
    let store = fresh_store("schema").await;

    let orphan = authorization_role_user::ActiveModel {
        role_id: Set(uuid::Uuid::new_v4()),
        user_id: Set(uuid::Uuid::new_v4()),
        description: Set(None),
    };
    assert!(orphan.insert(&store.conn).await.is_err());
}

#[tokio::test]
async fn deleting_user_cascades() {
    let store = fresh_store("schema").await;
    let user = add_user(&store, "gone@example.com").await;
    let admin = store.get_role("ADMIN").await.unwrap().unwrap();

    store
        .role_repo()
        .assign_user(admin.id, user.id, Some("bootstrap"))
        .await
        .unwrap();
    store
        .password_repo()
        .set_password(user.id, "$2b$12$abcdefghijklmnopqrstuv")
        .await
        .unwrap();
    store
        .reset_token_repo()
        .issue(user.id, "token-1")
        .await
        .unwrap();

    assert!(store.user_repo().delete_by_email(&user.email).await.unwrap());

    assert_eq!(RoleUser::find().count(&store.conn).await.unwrap(), 0);
    assert_eq!(UserPassword::find().count(&store.conn).await.unwrap(), 0);
    assert_eq!(ResetPasswordToken::find().count(&store.conn).await.unwrap(), 0);

    // The role itself is untouched.
    assert!(store.get_role("ADMIN").await.unwrap().is_some());
}

#[tokio::test]
async fn deleting_role_cascades_to_links_only() {
    let store = fresh_store("schema").await;
    let user = add_user(&store, "editor@example.com").await;
    let roles = store.role_repo();

    let editor = roles.create_role("EDITOR", Some("Edits users")).await.unwrap();
    for (name, access_type) in [("users", "read"), ("users", "write")] {
        let permission = roles
            .get_permission(name, access_type)
            .await
            .unwrap()
            .unwrap();
        roles.link_permission(editor.id, permission.id).await.unwrap();
    }
    roles.assign_user(editor.id, user.id, None).await.unwrap();

    assert!(roles.delete_role("EDITOR").await.unwrap());

    let editor_links = RolePermission::find()
        .filter(authorization_role_permission::Column::RoleId.eq(editor.id))
        .count(&store.conn)
        .await
        .unwrap();
    assert_eq!(editor_links, 0);
    assert_eq!(RolePermission::find().count(&store.conn).await.unwrap(), 10);
    assert_eq!(RoleUser::find().count(&store.conn).await.unwrap(), 0);

    assert!(store.get_user("editor@example.com").await.unwrap().is_some());
    assert_eq!(Permission::find().count(&store.conn).await.unwrap(), 10);
}

#[tokio::test]
async fn relinking_a_permission_is_a_no_op() {
    let store = fresh_store("schema").await;
    let roles = store.role_repo();

    let admin = roles.get_role("ADMIN").await.unwrap().unwrap();
    let permission = roles.get_permission("user", "read").await.unwrap().unwrap();

    roles.link_permission(admin.id, permission.id).await.unwrap();
    roles.link_permission(admin.id, permission.id).await.unwrap();

    assert_eq!(RolePermission::find().count(&store.conn).await.unwrap(), 10);
}

#[tokio::test]
async fn reopening_does_not_reseed() {
    let db_path = std::env::temp_dir().join(format!(
        "authbase-reopen-test-{}.db",
        uuid::Uuid::new_v4()
    ));
    let url = format!("sqlite:{}", db_path.display());

    let first = authbase::db::Store::new(&url).await.unwrap();
    first.ping().await.unwrap();
    drop(first);

    let second = authbase::db::Store::new(&url).await.unwrap();
    assert_eq!(Permission::find().count(&second.conn).await.unwrap(), 10);
    assert_eq!(Configuration::find().count(&second.conn).await.unwrap(), 5);
}
