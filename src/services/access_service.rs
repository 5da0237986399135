//! Domain service for role grants and permission checks.

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AccessError {
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Role not found: {0}")]
    RoleNotFound(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for AccessError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AccessError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(format!("{err:#}"))
    }
}

/// A permission as exposed to callers: the (name, type) pair.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct PermissionRef {
    pub name: String,
    pub access_type: String,
}

impl std::fmt::Display for PermissionRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.name, self.access_type)
    }
}

#[async_trait::async_trait]
pub trait AccessService: Send + Sync {
    /// Grants `role` to the user. Granting again only refreshes the description.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::UserNotFound`] or [`AccessError::RoleNotFound`]
    /// when either side does not exist.
    async fn grant_role(
        &self,
        email: &str,
        role: &str,
        description: Option<&str>,
    ) -> Result<(), AccessError>;

    /// Revokes `role` from the user. Returns whether a grant was removed.
    async fn revoke_role(&self, email: &str, role: &str) -> Result<bool, AccessError>;

    async fn roles_of(&self, email: &str) -> Result<Vec<String>, AccessError>;

    /// Distinct permissions granted to the user through any role.
    async fn permissions_of(&self, email: &str) -> Result<Vec<PermissionRef>, AccessError>;

    async fn has_permission(
        &self,
        email: &str,
        name: &str,
        access_type: &str,
    ) -> Result<bool, AccessError>;
}
