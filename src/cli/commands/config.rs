//! Configuration table command handlers

use crate::config::Config;
use crate::entities::configuration;

const MASK: &str = "********";

fn display_value(entry: &configuration::Model) -> &str {
    if entry.hashed {
        MASK
    } else {
        entry.value.as_deref().unwrap_or("(unset)")
    }
}

pub async fn cmd_config_list(config: &Config) -> anyhow::Result<()> {
    let store = super::open_store(config).await?;
    let entries = store.list_config().await?;

    if entries.is_empty() {
        println!("No configuration entries.");
        return Ok(());
    }

    println!("Configuration ({} entries)", entries.len());
    println!("{:-<60}", "");

    for entry in &entries {
        println!("{:<30} {}", entry.key, display_value(entry));
    }

    Ok(())
}

pub async fn cmd_config_get(config: &Config, key: &str) -> anyhow::Result<()> {
    let store = super::open_store(config).await?;

    match store.get_config(key).await? {
        Some(entry) => println!("{}", display_value(&entry)),
        None => println!("Configuration key not found: {key}"),
    }

    Ok(())
}

pub async fn cmd_config_set(
    config: &Config,
    key: &str,
    value: &str,
    hashed: bool,
) -> anyhow::Result<()> {
    let store = super::open_store(config).await?;
    store.set_config(key, Some(value), hashed).await?;

    println!("✓ {key} updated");
    Ok(())
}
