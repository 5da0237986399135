use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    Set, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::{authentication_reset_password_token, prelude::*};

pub struct ResetTokenRepository {
    conn: DatabaseConnection,
}

impl ResetTokenRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Stores `token` for the user, replacing any token they already hold.
    pub async fn issue(
        &self,
        user_id: Uuid,
        token: &str,
    ) -> Result<authentication_reset_password_token::Model> {
        let txn = self.conn.begin().await?;

        ResetPasswordToken::delete_many()
            .filter(authentication_reset_password_token::Column::UserId.eq(user_id))
            .exec(&txn)
            .await
            .context("Failed to clear previous reset token")?;

        let model = authentication_reset_password_token::ActiveModel {
            token: Set(token.to_string()),
            user_id: Set(user_id),
            created_at: Set(chrono::Utc::now()),
        }
        .insert(&txn)
        .await
        .context("Failed to store reset token")?;

        txn.commit().await?;
        Ok(model)
    }

    pub async fn find(
        &self,
        token: &str,
    ) -> Result<Option<authentication_reset_password_token::Model>> {
        ResetPasswordToken::find_by_id(token.to_string())
            .one(&self.conn)
            .await
            .context("Failed to query reset token")
    }

    pub async fn find_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Option<authentication_reset_password_token::Model>> {
        ResetPasswordToken::find()
            .filter(authentication_reset_password_token::Column::UserId.eq(user_id))
            .one(&self.conn)
            .await
            .context("Failed to query reset token")
    }

    /// Removes the token and returns it. `None` if it was missing or another
    /// caller removed it first.
    pub async fn consume(
        &self,
        token: &str,
    ) -> Result<Option<authentication_reset_password_token::Model>> {
        let Some(found) = self.find(token).await? else {
            return Ok(None);
        };

        if !Self::claim(&self.conn, token).await? {
            return Ok(None);
        }

        Ok(Some(found))
    }

    /// Deletes `token` on `db`. Only one caller ever sees `true` for a token.
    pub async fn claim<C: ConnectionTrait>(db: &C, token: &str) -> Result<bool> {
        let result = ResetPasswordToken::delete_by_id(token.to_string())
            .exec(db)
            .await
            .context("Failed to delete reset token")?;

        Ok(result.rows_affected > 0)
    }

    pub async fn delete_for_user(&self, user_id: Uuid) -> Result<u64> {
        let result = ResetPasswordToken::delete_many()
            .filter(authentication_reset_password_token::Column::UserId.eq(user_id))
            .exec(&self.conn)
            .await
            .context("Failed to delete reset tokens")?;

        Ok(result.rows_affected)
    }
}
