use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

use crate::constants::config_keys;
use crate::entities::{authorization_permission, authorization_role, configuration, user_simple};

pub mod migrator;
pub mod repositories;

pub use migrator::MigrationState;
pub use repositories::user::NewUser;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    /// Connects and applies any pending migrations.
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        let store = Self::connect(db_url, max_connections, min_connections).await?;

        migrator::apply(&store.conn).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        store.warn_on_placeholder_secret().await;

        Ok(store)
    }

    /// Connects without touching the schema.
    pub async fn connect(db_url: &str, max_connections: u32, min_connections: u32) -> Result<Self> {
        if let Some(path_str) = sqlite_file_path(db_url) {
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    pub async fn apply_migrations(&self) -> Result<()> {
        migrator::apply(&self.conn).await?;
        Ok(())
    }

    pub async fn revert_migrations(&self) -> Result<()> {
        migrator::revert(&self.conn).await?;
        Ok(())
    }

    pub async fn migration_status(&self) -> Result<Vec<MigrationState>> {
        Ok(migrator::status(&self.conn).await?)
    }

    pub fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    pub fn role_repo(&self) -> repositories::role::RoleRepository {
        repositories::role::RoleRepository::new(self.conn.clone())
    }

    pub fn password_repo(&self) -> repositories::password::PasswordRepository {
        repositories::password::PasswordRepository::new(self.conn.clone())
    }

    pub fn reset_token_repo(&self) -> repositories::reset_token::ResetTokenRepository {
        repositories::reset_token::ResetTokenRepository::new(self.conn.clone())
    }

    pub fn configuration_repo(&self) -> repositories::configuration::ConfigurationRepository {
        repositories::configuration::ConfigurationRepository::new(self.conn.clone())
    }

    pub async fn add_user(&self, user: NewUser) -> Result<user_simple::Model> {
        self.user_repo().create(user).await
    }

    pub async fn get_user(&self, email: &str) -> Result<Option<user_simple::Model>> {
        self.user_repo().get_by_email(email).await
    }

    pub async fn list_users(&self) -> Result<Vec<user_simple::Model>> {
        self.user_repo().list().await
    }

    pub async fn list_roles(&self) -> Result<Vec<authorization_role::Model>> {
        self.role_repo().list_roles().await
    }

    pub async fn get_role(&self, name: &str) -> Result<Option<authorization_role::Model>> {
        self.role_repo().get_role(name).await
    }

    pub async fn list_permissions(&self) -> Result<Vec<authorization_permission::Model>> {
        self.role_repo().list_permissions().await
    }

    pub async fn get_config(&self, key: &str) -> Result<Option<configuration::Model>> {
        self.configuration_repo().get(key).await
    }

    pub async fn list_config(&self) -> Result<Vec<configuration::Model>> {
        self.configuration_repo().list().await
    }

    pub async fn set_config(&self, key: &str, value: Option<&str>, hashed: bool) -> Result<()> {
        self.configuration_repo().set(key, value, hashed).await
    }

    /// Whether `JWT_SECRET` still holds the seeded placeholder.
    pub async fn uses_placeholder_secret(&self) -> Result<bool> {
        let secret = self.configuration_repo().value(config_keys::JWT_SECRET).await?;
        Ok(secret.as_deref() == Some(config_keys::PLACEHOLDER_JWT_SECRET))
    }

    async fn warn_on_placeholder_secret(&self) {
        match self.uses_placeholder_secret().await {
            Ok(true) => warn!(
                "{} still holds the seeded placeholder; replace it before going to production",
                config_keys::JWT_SECRET
            ),
            Ok(false) => {}
            Err(e) => warn!("Could not check {}: {e:#}", config_keys::JWT_SECRET),
        }
    }
}

/// File path behind a `sqlite:` URL, `None` for in-memory or non-SQLite URLs.
fn sqlite_file_path(db_url: &str) -> Option<&str> {
    let rest = db_url.strip_prefix("sqlite:")?;
    let rest = rest.trim_start_matches("//");
    let path = rest.split('?').next().unwrap_or(rest);

    if path.is_empty() || path.starts_with(":memory:") {
        None
    } else {
        Some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_file_path_strips_scheme_and_query() {
        assert_eq!(sqlite_file_path("sqlite:data/app.db"), Some("data/app.db"));
        assert_eq!(
            sqlite_file_path("sqlite://data/app.db?mode=rwc"),
            Some("data/app.db")
        );
        assert_eq!(sqlite_file_path("sqlite::memory:"), None);
        assert_eq!(sqlite_file_path("postgres://localhost/app"), None);
    }
}
