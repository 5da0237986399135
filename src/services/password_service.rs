//! Domain service for stored password hashes and reset tokens.
//!
//! Hashing happens upstream; this service only stores, rotates and
//! validates the hashes it is handed.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Reset token not found")]
    TokenNotFound,

    #[error("Reset token expired")]
    TokenExpired,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for PasswordError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for PasswordError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(format!("{err:#}"))
    }
}

#[async_trait::async_trait]
pub trait PasswordService: Send + Sync {
    /// Stores a new password hash, keeping the old one as the previous hash.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordError::Validation`] if the hash is empty, longer than
    /// the column allows, or matches the current or previous hash.
    async fn set_password(&self, email: &str, hash: &str) -> Result<(), PasswordError>;

    /// Issues a fresh reset token, replacing any outstanding one.
    async fn issue_reset_token(&self, email: &str) -> Result<String, PasswordError>;

    /// Sets the password for the token's owner and consumes the token.
    /// Returns the owner's email.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordError::TokenExpired`] (and drops the token) once the
    /// configured reset window has passed.
    async fn redeem_reset_token(&self, token: &str, hash: &str) -> Result<String, PasswordError>;

    /// How long a reset token stays valid.
    async fn reset_token_ttl(&self) -> Result<chrono::Duration, PasswordError>;

    /// Cost factor upstream hashers should use.
    async fn salt_rounds(&self) -> Result<u32, PasswordError>;
}
