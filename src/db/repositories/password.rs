use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    Set,
};
use uuid::Uuid;

use crate::entities::{authentication_user_password, prelude::*};

pub struct PasswordRepository {
    conn: DatabaseConnection,
}

impl PasswordRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Option<authentication_user_password::Model>> {
        Self::get_for_user_on(&self.conn, user_id).await
    }

    /// Stores a new password hash. An existing hash is kept as `previous_password`.
    pub async fn set_password(
        &self,
        user_id: Uuid,
        hash: &str,
    ) -> Result<authentication_user_password::Model> {
        Self::set_password_on(&self.conn, user_id, hash).await
    }

    pub async fn get_for_user_on<C: ConnectionTrait>(
        db: &C,
        user_id: Uuid,
    ) -> Result<Option<authentication_user_password::Model>> {
        UserPassword::find()
            .filter(authentication_user_password::Column::UserId.eq(user_id))
            .one(db)
            .await
            .context("Failed to query user password")
    }

    pub async fn set_password_on<C: ConnectionTrait>(
        db: &C,
        user_id: Uuid,
        hash: &str,
    ) -> Result<authentication_user_password::Model> {
        let existing = Self::get_for_user_on(db, user_id).await?;

        let saved = if let Some(current) = existing {
            let previous = current.password.clone();
            let mut active: authentication_user_password::ActiveModel = current.into();
            active.previous_password = Set(Some(previous));
            active.password = Set(hash.to_string());
            active.updated_at = Set(Some(chrono::Utc::now()));
            active
                .update(db)
                .await
                .context("Failed to update password")?
        } else {
            authentication_user_password::ActiveModel {
                id: Set(Uuid::new_v4()),
                user_id: Set(user_id),
                password: Set(hash.to_string()),
                previous_password: Set(None),
                created_at: Set(chrono::Utc::now()),
                updated_at: Set(None),
            }
            .insert(db)
            .await
            .context("Failed to store password")?
        };

        Ok(saved)
    }
}
