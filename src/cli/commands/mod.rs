mod config;
mod migrate;
mod role;
mod user;

pub use config::{cmd_config_get, cmd_config_list, cmd_config_set};
pub use migrate::{cmd_migrate_down, cmd_migrate_refresh, cmd_migrate_status, cmd_migrate_up};
pub use role::{cmd_role_list, cmd_role_permissions};
pub use user::{cmd_user_add, cmd_user_grant, cmd_user_list, cmd_user_permissions, cmd_user_revoke};

use crate::config::Config;
use crate::db::Store;

/// Opens the configured database, applying pending migrations first.
async fn open_store(config: &Config) -> anyhow::Result<Store> {
    Store::with_pool_options(
        &config.database.url,
        config.database.max_connections,
        config.database.min_connections,
    )
    .await
}
