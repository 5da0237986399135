//! `SeaORM` implementation of the `AccessService` trait.

use crate::db::Store;
use crate::entities::{authorization_role, user_simple};
use crate::services::access_service::{AccessError, AccessService, PermissionRef};
use async_trait::async_trait;
use tracing::info;

pub struct SeaOrmAccessService {
    store: Store,
}

impl SeaOrmAccessService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    async fn user(&self, email: &str) -> Result<user_simple::Model, AccessError> {
        self.store
            .get_user(email)
            .await?
            .ok_or_else(|| AccessError::UserNotFound(email.to_string()))
    }

    async fn role(&self, name: &str) -> Result<authorization_role::Model, AccessError> {
        self.store
            .get_role(name)
            .await?
            .ok_or_else(|| AccessError::RoleNotFound(name.to_string()))
    }
}

#[async_trait]
impl AccessService for SeaOrmAccessService {
    async fn grant_role(
        &self,
        email: &str,
        role: &str,
        description: Option<&str>,
    ) -> Result<(), AccessError> {
        let user = self.user(email).await?;
        let role = self.role(role).await?;

        self.store
            .role_repo()
            .assign_user(role.id, user.id, description)
            .await?;

        info!(user = %email, role = %role.name, "Role granted");
        Ok(())
    }

    async fn revoke_role(&self, email: &str, role: &str) -> Result<bool, AccessError> {
        let user = self.user(email).await?;
        let role = self.role(role).await?;

        let removed = self.store.role_repo().unassign_user(role.id, user.id).await?;

        if removed {
            info!(user = %email, role = %role.name, "Role revoked");
        }
        Ok(removed)
    }

    async fn roles_of(&self, email: &str) -> Result<Vec<String>, AccessError> {
        let user = self.user(email).await?;
        let roles = self.store.role_repo().roles_for_user(user.id).await?;

        Ok(roles.into_iter().map(|r| r.name).collect())
    }

    async fn permissions_of(&self, email: &str) -> Result<Vec<PermissionRef>, AccessError> {
        let user = self.user(email).await?;
        let permissions = self.store.role_repo().permissions_for_user(user.id).await?;

        Ok(permissions
            .into_iter()
            .map(|p| PermissionRef {
                name: p.name,
                access_type: p.access_type,
            })
            .collect())
    }

    async fn has_permission(
        &self,
        email: &str,
        name: &str,
        access_type: &str,
    ) -> Result<bool, AccessError> {
        Ok(self
            .permissions_of(email)
            .await?
            .iter()
            .any(|p| p.name == name && p.access_type == access_type))
    }
}
