//! Role command handlers

use crate::config::Config;

pub async fn cmd_role_list(config: &Config) -> anyhow::Result<()> {
    let store = super::open_store(config).await?;
    let roles = store.list_roles().await?;

    println!("Roles ({} total)", roles.len());
    println!("{:-<50}", "");

    for role in roles {
        match &role.description {
            Some(description) => println!("• {} - {description}", role.name),
            None => println!("• {}", role.name),
        }
    }

    Ok(())
}

pub async fn cmd_role_permissions(config: &Config, name: &str) -> anyhow::Result<()> {
    let store = super::open_store(config).await?;

    let Some(role) = store.get_role(name).await? else {
        println!("Role not found: {name}");
        println!("Use 'authbase role list' to see roles.");
        return Ok(());
    };

    let permissions = store.role_repo().permissions_for_role(&role).await?;

    println!("{} ({} permissions)", role.name, permissions.len());
    println!("{:-<50}", "");
    for permission in permissions {
        println!("  {}:{}", permission.name, permission.access_type);
    }

    Ok(())
}
