use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::{prelude::*, user_simple};

/// Fields supplied when registering a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub phone: Option<String>,
}

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Inserts a user with a fresh surrogate id.
    ///
    /// Duplicate emails or phone numbers are rejected by the database.
    pub async fn create(&self, user: NewUser) -> Result<user_simple::Model> {
        let active = user_simple::ActiveModel {
            id: Set(Uuid::new_v4()),
            first_name: Set(user.first_name),
            last_name: Set(user.last_name),
            email: Set(user.email.clone()),
            phone: Set(user.phone),
            created_at: Set(chrono::Utc::now()),
            updated_at: Set(None),
        };

        UserSimple::insert(active)
            .exec_without_returning(&self.conn)
            .await
            .with_context(|| format!("Failed to insert user {}", user.email))?;

        self.get_by_email(&user.email)
            .await?
            .ok_or_else(|| anyhow::anyhow!("User vanished after insert: {}", user.email))
    }

    pub async fn get_by_email(&self, email: &str) -> Result<Option<user_simple::Model>> {
        UserSimple::find_by_id(email.to_string())
            .one(&self.conn)
            .await
            .context("Failed to query user by email")
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<user_simple::Model>> {
        UserSimple::find()
            .filter(user_simple::Column::Id.eq(id))
            .one(&self.conn)
            .await
            .context("Failed to query user by ID")
    }

    pub async fn list(&self) -> Result<Vec<user_simple::Model>> {
        UserSimple::find()
            .order_by_asc(user_simple::Column::Email)
            .all(&self.conn)
            .await
            .context("Failed to list users")
    }

    pub async fn update_names(
        &self,
        email: &str,
        first_name: &str,
        last_name: Option<&str>,
    ) -> Result<user_simple::Model> {
        let user = self
            .get_by_email(email)
            .await?
            .ok_or_else(|| anyhow::anyhow!("User not found: {email}"))?;

        let mut active: user_simple::ActiveModel = user.into();
        active.first_name = Set(first_name.to_string());
        active.last_name = Set(last_name.map(str::to_string));
        active.updated_at = Set(Some(chrono::Utc::now()));

        active
            .update(&self.conn)
            .await
            .context("Failed to update user")
    }

    /// Deletes a user; roles, password and reset token go with it.
    pub async fn delete_by_email(&self, email: &str) -> Result<bool> {
        let result = UserSimple::delete_by_id(email.to_string())
            .exec(&self.conn)
            .await
            .context("Failed to delete user")?;

        Ok(result.rows_affected > 0)
    }
}
