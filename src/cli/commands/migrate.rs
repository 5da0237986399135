//! Migration command handlers

use crate::config::Config;
use crate::db::Store;

async fn open(config: &Config) -> anyhow::Result<Store> {
    Store::connect(
        &config.database.url,
        config.database.max_connections,
        config.database.min_connections,
    )
    .await
}

pub async fn cmd_migrate_up(config: &Config) -> anyhow::Result<()> {
    let store = open(config).await?;
    store.apply_migrations().await?;
    println!("✓ Migrations applied");
    Ok(())
}

pub async fn cmd_migrate_down(config: &Config) -> anyhow::Result<()> {
    let store = open(config).await?;
    store.revert_migrations().await?;
    println!("✓ Migrations reverted");
    Ok(())
}

pub async fn cmd_migrate_refresh(config: &Config) -> anyhow::Result<()> {
    let store = open(config).await?;
    store.revert_migrations().await?;
    store.apply_migrations().await?;
    println!("✓ Schema rebuilt");
    Ok(())
}

pub async fn cmd_migrate_status(config: &Config) -> anyhow::Result<()> {
    let store = open(config).await?;
    let migrations = store.migration_status().await?;

    println!("Migrations ({} total)", migrations.len());
    println!("{:-<50}", "");

    for migration in migrations {
        let marker = if migration.applied { "✓" } else { "•" };
        let state = if migration.applied { "applied" } else { "pending" };
        println!("{marker} {} [{state}]", migration.name);
    }

    Ok(())
}
