use anyhow::{Context, Result};
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder, Set};

use crate::entities::{configuration, prelude::*};

pub struct ConfigurationRepository {
    conn: DatabaseConnection,
}

impl ConfigurationRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get(&self, key: &str) -> Result<Option<configuration::Model>> {
        Configuration::find_by_id(key.to_string())
            .one(&self.conn)
            .await
            .with_context(|| format!("Failed to read configuration key {key}"))
    }

    /// Shorthand for the value of `key`, `None` when the key or value is absent.
    pub async fn value(&self, key: &str) -> Result<Option<String>> {
        Ok(self.get(key).await?.and_then(|entry| entry.value))
    }

    pub async fn list(&self) -> Result<Vec<configuration::Model>> {
        Configuration::find()
            .order_by_asc(configuration::Column::Key)
            .all(&self.conn)
            .await
            .context("Failed to list configuration")
    }

    pub async fn set(&self, key: &str, value: Option<&str>, hashed: bool) -> Result<()> {
        let active = configuration::ActiveModel {
            key: Set(key.to_string()),
            value: Set(value.map(str::to_string)),
            hashed: Set(hashed),
        };

        Configuration::insert(active)
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(configuration::Column::Key)
                    .update_columns([configuration::Column::Value, configuration::Column::Hashed])
                    .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await
            .with_context(|| format!("Failed to write configuration key {key}"))?;

        Ok(())
    }

    pub async fn delete(&self, key: &str) -> Result<bool> {
        let result = Configuration::delete_by_id(key.to_string())
            .exec(&self.conn)
            .await
            .context("Failed to delete configuration key")?;

        Ok(result.rows_affected > 0)
    }
}
