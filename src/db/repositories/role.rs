use anyhow::{Context, Result};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, JoinType, ModelTrait, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, Set,
};
use uuid::Uuid;

use crate::entities::{
    authorization_permission, authorization_role, authorization_role_permission,
    authorization_role_user, prelude::*,
};

pub struct RoleRepository {
    conn: DatabaseConnection,
}

impl RoleRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    // ========================================================================
    // Roles
    // ========================================================================

    pub async fn list_roles(&self) -> Result<Vec<authorization_role::Model>> {
        Role::find()
            .order_by_asc(authorization_role::Column::Name)
            .all(&self.conn)
            .await
            .context("Failed to list roles")
    }

    pub async fn get_role(&self, name: &str) -> Result<Option<authorization_role::Model>> {
        Role::find_by_id(name.to_string())
            .one(&self.conn)
            .await
            .context("Failed to query role")
    }

    pub async fn create_role(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<authorization_role::Model> {
        let active = authorization_role::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            description: Set(description.map(str::to_string)),
        };

        Role::insert(active)
            .exec_without_returning(&self.conn)
            .await
            .with_context(|| format!("Failed to create role {name}"))?;

        self.get_role(name)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Role vanished after insert: {name}"))
    }

    /// Deletes a role along with its permission links and user grants.
    pub async fn delete_role(&self, name: &str) -> Result<bool> {
        let result = Role::delete_by_id(name.to_string())
            .exec(&self.conn)
            .await
            .context("Failed to delete role")?;

        Ok(result.rows_affected > 0)
    }

    // ========================================================================
    // Permissions
    // ========================================================================

    pub async fn list_permissions(&self) -> Result<Vec<authorization_permission::Model>> {
        Permission::find()
            .order_by_asc(authorization_permission::Column::Name)
            .order_by_asc(authorization_permission::Column::AccessType)
            .all(&self.conn)
            .await
            .context("Failed to list permissions")
    }

    pub async fn get_permission(
        &self,
        name: &str,
        access_type: &str,
    ) -> Result<Option<authorization_permission::Model>> {
        Permission::find_by_id((name.to_string(), access_type.to_string()))
            .one(&self.conn)
            .await
            .context("Failed to query permission")
    }

    pub async fn permissions_for_role(
        &self,
        role: &authorization_role::Model,
    ) -> Result<Vec<authorization_permission::Model>> {
        role.find_related(Permission)
            .order_by_asc(authorization_permission::Column::Name)
            .order_by_asc(authorization_permission::Column::AccessType)
            .all(&self.conn)
            .await
            .context("Failed to load role permissions")
    }

    /// Links a permission to a role. Linking twice is a no-op.
    pub async fn link_permission(&self, role_id: Uuid, permission_id: Uuid) -> Result<()> {
        let active = authorization_role_permission::ActiveModel {
            role_id: Set(role_id),
            permission_id: Set(permission_id),
        };

        RolePermission::insert(active)
            .on_conflict(
                sea_orm::sea_query::OnConflict::columns([
                    authorization_role_permission::Column::RoleId,
                    authorization_role_permission::Column::PermissionId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await
            .context("Failed to link permission")?;

        Ok(())
    }

    // ========================================================================
    // User grants
    // ========================================================================

    /// Grants a role to a user, replacing the description of an existing grant.
    pub async fn assign_user(
        &self,
        role_id: Uuid,
        user_id: Uuid,
        description: Option<&str>,
    ) -> Result<()> {
        let active = authorization_role_user::ActiveModel {
            role_id: Set(role_id),
            user_id: Set(user_id),
            description: Set(description.map(str::to_string)),
        };

        RoleUser::insert(active)
            .on_conflict(
                sea_orm::sea_query::OnConflict::columns([
                    authorization_role_user::Column::RoleId,
                    authorization_role_user::Column::UserId,
                ])
                .update_column(authorization_role_user::Column::Description)
                .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await
            .context("Failed to assign role")?;

        Ok(())
    }

    pub async fn unassign_user(&self, role_id: Uuid, user_id: Uuid) -> Result<bool> {
        let result = RoleUser::delete_many()
            .filter(authorization_role_user::Column::RoleId.eq(role_id))
            .filter(authorization_role_user::Column::UserId.eq(user_id))
            .exec(&self.conn)
            .await
            .context("Failed to revoke role")?;

        Ok(result.rows_affected > 0)
    }

    pub async fn roles_for_user(&self, user_id: Uuid) -> Result<Vec<authorization_role::Model>> {
        Role::find()
            .join(
                JoinType::InnerJoin,
                authorization_role::Relation::RoleUser.def(),
            )
            .filter(authorization_role_user::Column::UserId.eq(user_id))
            .order_by_asc(authorization_role::Column::Name)
            .all(&self.conn)
            .await
            .context("Failed to load user roles")
    }

    /// Every distinct permission reachable through any of the user's roles.
    pub async fn permissions_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<authorization_permission::Model>> {
        Permission::find()
            .join(
                JoinType::InnerJoin,
                authorization_permission::Relation::RolePermission.def(),
            )
            .join(
                JoinType::InnerJoin,
                authorization_role_permission::Relation::Role.def(),
            )
            .join(
                JoinType::InnerJoin,
                authorization_role::Relation::RoleUser.def(),
            )
            .filter(authorization_role_user::Column::UserId.eq(user_id))
            .distinct()
            .order_by_asc(authorization_permission::Column::Name)
            .order_by_asc(authorization_permission::Column::AccessType)
            .all(&self.conn)
            .await
            .context("Failed to load user permissions")
    }
}
