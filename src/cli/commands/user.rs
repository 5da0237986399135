//! User command handlers

use crate::config::Config;
use crate::db::NewUser;
use crate::services::{AccessService, SeaOrmAccessService};

pub async fn cmd_user_add(
    config: &Config,
    email: &str,
    first_name: &str,
    last_name: Option<&str>,
    phone: Option<&str>,
) -> anyhow::Result<()> {
    let store = super::open_store(config).await?;

    let user = store
        .add_user(NewUser {
            email: email.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.map(str::to_string),
            phone: phone.map(str::to_string),
        })
        .await?;

    println!("✓ Added: {} (ID: {})", user.email, user.id);
    Ok(())
}

pub async fn cmd_user_list(config: &Config) -> anyhow::Result<()> {
    let store = super::open_store(config).await?;
    let users = store.list_users().await?;

    if users.is_empty() {
        println!("No users.");
        println!();
        println!("Add one with: authbase user add <email> <first name>");
        return Ok(());
    }

    println!("Users ({} total)", users.len());
    println!("{:-<70}", "");

    for user in users {
        let name = match &user.last_name {
            Some(last) => format!("{} {last}", user.first_name),
            None => user.first_name.clone(),
        };
        println!("• {} <{}>", name, user.email);
        println!(
            "  ID: {} | Phone: {} | Created: {}",
            user.id,
            user.phone.as_deref().unwrap_or("-"),
            user.created_at.to_rfc3339()
        );
    }

    Ok(())
}

pub async fn cmd_user_grant(
    config: &Config,
    email: &str,
    role: &str,
    description: Option<&str>,
) -> anyhow::Result<()> {
    let store = super::open_store(config).await?;
    SeaOrmAccessService::new(store)
        .grant_role(email, role, description)
        .await?;

    println!("✓ Granted {role} to {email}");
    Ok(())
}

pub async fn cmd_user_revoke(config: &Config, email: &str, role: &str) -> anyhow::Result<()> {
    let store = super::open_store(config).await?;
    let removed = SeaOrmAccessService::new(store)
        .revoke_role(email, role)
        .await?;

    if removed {
        println!("✓ Revoked {role} from {email}");
    } else {
        println!("{email} did not hold {role}");
    }
    Ok(())
}

pub async fn cmd_user_permissions(config: &Config, email: &str) -> anyhow::Result<()> {
    let store = super::open_store(config).await?;
    let access = SeaOrmAccessService::new(store);

    let roles = access.roles_of(email).await?;
    let permissions = access.permissions_of(email).await?;

    println!("Roles: {}", if roles.is_empty() { "-".to_string() } else { roles.join(", ") });
    println!("Permissions ({}):", permissions.len());
    for permission in permissions {
        println!("  {permission}");
    }

    Ok(())
}
