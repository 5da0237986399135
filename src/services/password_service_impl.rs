//! `SeaORM` implementation of the `PasswordService` trait.

use crate::constants::{config_keys, limits};
use crate::db::Store;
use crate::db::repositories::password::PasswordRepository;
use crate::db::repositories::reset_token::ResetTokenRepository;
use crate::entities::user_simple;
use crate::parser::parse_duration;
use crate::services::password_service::{PasswordError, PasswordService};
use async_trait::async_trait;
use sea_orm::{ConnectionTrait, TransactionTrait};
use tracing::{info, warn};
use uuid::Uuid;

pub struct SeaOrmPasswordService {
    store: Store,
}

impl SeaOrmPasswordService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    async fn user(&self, email: &str) -> Result<user_simple::Model, PasswordError> {
        self.store
            .get_user(email)
            .await?
            .ok_or_else(|| PasswordError::UserNotFound(email.to_string()))
    }
}

#[async_trait]
impl PasswordService for SeaOrmPasswordService {
    async fn set_password(&self, email: &str, hash: &str) -> Result<(), PasswordError> {
        let user = self.user(email).await?;
        validate_hash(hash)?;

        let txn = self.store.conn.begin().await?;
        rotate_hash(&txn, user.id, hash).await?;
        txn.commit().await?;

        info!(user = %email, "Password updated");
        Ok(())
    }

    async fn issue_reset_token(&self, email: &str) -> Result<String, PasswordError> {
        let user = self.user(email).await?;
        let token = generate_reset_token();

        self.store.reset_token_repo().issue(user.id, &token).await?;

        info!(user = %email, "Reset token issued");
        Ok(token)
    }

    async fn redeem_reset_token(&self, token: &str, hash: &str) -> Result<String, PasswordError> {
        let tokens = self.store.reset_token_repo();
        let found = tokens.find(token).await?.ok_or(PasswordError::TokenNotFound)?;

        let ttl = self.reset_token_ttl().await?;
        if chrono::Utc::now() - found.created_at >= ttl {
            tokens.consume(token).await?;
            warn!("Expired reset token presented");
            return Err(PasswordError::TokenExpired);
        }

        validate_hash(hash)?;

        let user = self
            .store
            .user_repo()
            .get_by_id(found.user_id)
            .await?
            .ok_or_else(|| PasswordError::UserNotFound(found.user_id.to_string()))?;

        // Claim and password write commit together; a rejected hash rolls the claim back.
        let txn = self.store.conn.begin().await?;
        if !ResetTokenRepository::claim(&txn, token).await? {
            return Err(PasswordError::TokenNotFound);
        }
        rotate_hash(&txn, user.id, hash).await?;
        txn.commit().await?;

        info!(user = %user.email, "Password reset");
        Ok(user.email)
    }

    async fn reset_token_ttl(&self) -> Result<chrono::Duration, PasswordError> {
        let raw = self
            .store
            .configuration_repo()
            .value(config_keys::RESET_PASSWORD_EXPIRATION)
            .await?;

        match raw {
            None => Ok(chrono::Duration::hours(
                limits::DEFAULT_RESET_PASSWORD_EXPIRATION_HOURS,
            )),
            Some(value) => parse_duration(&value).ok_or_else(|| {
                PasswordError::Config(format!(
                    "{} is not a duration: {value}",
                    config_keys::RESET_PASSWORD_EXPIRATION
                ))
            }),
        }
    }

    async fn salt_rounds(&self) -> Result<u32, PasswordError> {
        let raw = self
            .store
            .configuration_repo()
            .value(config_keys::SALT_ROUNDS)
            .await?;

        match raw {
            None => Ok(limits::DEFAULT_SALT_ROUNDS),
            Some(value) => value.trim().parse().map_err(|_| {
                PasswordError::Config(format!(
                    "{} is not a number: {value}",
                    config_keys::SALT_ROUNDS
                ))
            }),
        }
    }
}

/// Stores `hash` for the user on `db`, refusing the current or previous hash.
async fn rotate_hash<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
    hash: &str,
) -> Result<(), PasswordError> {
    if let Some(current) = PasswordRepository::get_for_user_on(db, user_id).await?
        && (current.password == hash || current.previous_password.as_deref() == Some(hash))
    {
        return Err(PasswordError::Validation(
            "New password must differ from the current and previous password".to_string(),
        ));
    }

    PasswordRepository::set_password_on(db, user_id, hash).await?;
    Ok(())
}

fn validate_hash(hash: &str) -> Result<(), PasswordError> {
    if hash.is_empty() {
        return Err(PasswordError::Validation(
            "Password hash cannot be empty".to_string(),
        ));
    }

    if hash.chars().count() > limits::PASSWORD_HASH_MAX_LEN {
        return Err(PasswordError::Validation(format!(
            "Password hash exceeds {} characters",
            limits::PASSWORD_HASH_MAX_LEN
        )));
    }

    Ok(())
}

/// Generate a random reset token (64 character hex string)
#[must_use]
pub fn generate_reset_token() -> String {
    use rand::Rng;

    let mut rng = rand::rng();
    let bytes: [u8; limits::RESET_TOKEN_BYTES] = rng.random();

    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
